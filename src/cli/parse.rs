use crate::{entity::EntityRef, success, warning};

pub fn parse(url: &str) {
    match EntityRef::parse(url) {
        Ok(entity) => success!("{} {} ({})", entity.kind, entity.id, entity),
        Err(e) => warning!("{}", e),
    }
}
