pub mod code;
pub mod ip;
pub mod url_validator;

pub use code::{
    CODE_ALPHABET, CODE_LENGTH, CodeGenerator, RESERVED_CODES, RandomCodeGenerator,
    is_reserved_code, is_valid_short_code,
};
