//! Error Kind
//!
//! The closed set of failure classes the API reports to clients.

use serde::Serialize;

/// クライアントに返すエラー分類
///
/// 認証 API が返すステータスはこの 4 種類に限られます。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert!(ErrorKind::ServiceUnavailable.is_retryable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 400: 入力が不正（JSON 不備、Cookie 欠落）
    BadRequest,
    /// 401: 認証失敗（資格情報・トークンの不一致、期限切れ、失効）
    Unauthorized,
    /// 500: サーバー内部エラー（署名、乱数、ストレージ）
    InternalServerError,
    /// 503: データベースに到達できない
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 標準の理由フレーズ
    #[inline]
    pub const fn reason_phrase(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 同じリクエストを後で再送すれば成功し得るか
    #[inline]
    pub const fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::ServiceUnavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason_phrase())
    }
}
