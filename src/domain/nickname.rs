use thiserror::Error;

pub const MAX_NICKNAME_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("nickname must not be empty")]
    Empty,
    #[error("up to {} characters allowed", MAX_NICKNAME_LENGTH)]
    TooLong,
    #[error("only Korean, English letters and digits are allowed")]
    InvalidCharacters,
}

/// Local checks run before asking the backend about duplicates.
pub fn validate_nickname(nickname: &str) -> Result<(), NicknameError> {
    if nickname.is_empty() {
        return Err(NicknameError::Empty);
    }
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(NicknameError::TooLong);
    }
    if !nickname.chars().all(is_allowed) {
        return Err(NicknameError::InvalidCharacters);
    }
    Ok(())
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('가'..='힣').contains(&c) || ('ㄱ'..='ㅣ').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_korean_english_and_digits() {
        assert_eq!(validate_nickname("포킷user1"), Ok(()));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(validate_nickname("가나다라마바사아자차"), Ok(()));
        assert_eq!(
            validate_nickname("가나다라마바사아자차카"),
            Err(NicknameError::TooLong)
        );
    }

    #[test]
    fn rejects_symbols_and_spaces() {
        assert_eq!(
            validate_nickname("poki t"),
            Err(NicknameError::InvalidCharacters)
        );
        assert_eq!(
            validate_nickname("pokit!"),
            Err(NicknameError::InvalidCharacters)
        );
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(validate_nickname(""), Err(NicknameError::Empty));
    }
}
