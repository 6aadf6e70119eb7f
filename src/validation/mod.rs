pub mod patterns;
pub mod tables;

pub use patterns::{
    classify_token, is_eee_code, is_part_number, is_serial_number, require_serial_number, TokenKind,
};
