//! Piecework Common Library
//!
//! 作業実績入力フォームのフロントエンド間で共有される型とユーティリティ

pub mod error;
pub mod parser;
pub mod tables;
pub mod types;

pub use error::{Error, Result};
pub use parser::{
    coerce_unit_price, coerce_work_output, parse_float_prefix, parse_init_data, parse_int_prefix,
    parse_submit_response,
};
pub use tables::{CodedCandidate, ProductCodeTable, UnitPriceTable, PREFIX_SEARCH_MIN_LEN};
pub use types::{
    Candidate, FormState, InitData, MessageKind, ReferenceData, StatusMessage, SubmitPayload,
    SubmitResponse, Worker,
};
