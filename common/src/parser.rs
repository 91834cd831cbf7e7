//! 入力値・APIレスポンスのパーサー
//!
//! フォームの数値欄は文字列のまま保持し、送信時に先頭の数値部分だけを
//! 読み取る。読み取れない場合は 0 とする。

use crate::error::{Error, Result};
use crate::types::{InitData, SubmitResponse};

/// 先頭の10進整数部分を読み取る
///
/// # Examples
/// ```
/// use piecework_common::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix(" 25個"), Some(25));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// 先頭の浮動小数点数部分を読み取る
///
/// 符号・小数点・指数部に対応する。
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部は数字が続く場合のみ採用
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// 送信用の単価。非有限値・負値は 0
pub fn coerce_unit_price(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// 送信用の数量。読み取れない・負値は 0
pub fn coerce_work_output(input: &str) -> i64 {
    parse_int_prefix(input).filter(|n| *n >= 0).unwrap_or(0)
}

/// `/api/init-data` のレスポンスをパース
pub fn parse_init_data(body: &str) -> Result<InitData> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("init-data JSONパースエラー: {}", e)))
}

/// `/api/submit` のレスポンスをパース
pub fn parse_submit_response(body: &str) -> Result<SubmitResponse> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("submit JSONパースエラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  7 "), Some(7));
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+5kg"), Some(5));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("x1"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("500"), Some(500.0));
        assert_eq!(parse_float_prefix("12.5円"), Some(12.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn test_coerce_work_output() {
        assert_eq!(coerce_work_output("0"), 0);
        assert_eq!(coerce_work_output("120"), 120);
        assert_eq!(coerce_work_output(""), 0);
        assert_eq!(coerce_work_output("たくさん"), 0);
        assert_eq!(coerce_work_output("-4"), 0);
    }

    #[test]
    fn test_coerce_unit_price() {
        assert_eq!(coerce_unit_price(500.0), 500.0);
        assert_eq!(coerce_unit_price(f64::NAN), 0.0);
        assert_eq!(coerce_unit_price(-1.0), 0.0);
    }

    #[test]
    fn test_parse_init_data_error() {
        let err = parse_init_data("<html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_submit_response() {
        let response = parse_submit_response(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(response.message.as_deref(), Some("ok"));
    }
}
