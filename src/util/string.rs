pub const ELLIPSIS: char = '…';

pub struct StringUtils {}

impl StringUtils {
    /// Cuts `message` to `max_chars` characters and marks the cut with an ellipsis.
    pub fn shorten(message: &str, max_chars: Option<usize>) -> String {
        match max_chars {
            Some(max) if message.chars().count() > max => {
                let mut shortened: String = message.chars().take(max).collect();
                shortened.push(ELLIPSIS);
                shortened
            }
            _ => message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(StringUtils::shorten("disk full", None), "disk full");
        assert_eq!(StringUtils::shorten("disk full", Some(9)), "disk full");
        assert_eq!(StringUtils::shorten("disk full", Some(4)), "disk…");
        assert_eq!(StringUtils::shorten("überall", Some(2)), "üb…");
    }
}
