//! Liveness handler

use crate::constants::INDEX_MESSAGE;

pub async fn index() -> &'static str {
    INDEX_MESSAGE
}
