//! Username Value Object
//!
//! ユーザー名はログイン時にユーザーを特定するための識別子。
//! ユーザーは外部で作成され、保存値のまま格納されている。
//!
//! ## 生成経路
//! - `new`: 新規ユーザー名の検証（NFKC正規化 → 前後の空白除去 → 検証）
//! - `for_lookup`: ログイン照合用。前後の空白除去のみで、保存値と完全一致で照合する
//! - `from_db`: 保存値そのもの
//!
//! ## `new` の不変条件
//! - 空でない
//! - 長さ: 最大 `USERNAME_MAX_LENGTH` 文字
//! - 空白・制御文字を含まない

use derive_more::Display;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for usernames (in characters)
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Error returned when a username cannot be valid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Username cannot contain whitespace or control characters")]
    InvalidCharacter,
}

/// Normalized username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Username(String);

impl Username {
    /// Normalize (NFKC, trim) and validate raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let normalized = normalized.trim();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(normalized.to_string()))
    }

    /// Key for an exact-match lookup of a stored username
    ///
    /// Only surrounding whitespace is removed; stored names predate the
    /// rules of [`Username::new`] and must still be found. `None` if blank.
    pub fn for_lookup(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
