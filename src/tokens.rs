/// Approximate token count of `text`.
///
/// Counts whitespace-delimited words. Only used as a relative sizing signal for
/// budgeting, never as a billing-accurate count.
pub fn estimate(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(estimate(""), 0);
        assert_eq!(estimate("   \n\t "), 0);
    }

    #[test]
    fn counts_whitespace_delimited_words() {
        assert_eq!(estimate("fn main() { println!(\"hi\"); }"), 5);
        assert_eq!(estimate("+ added line\n- removed line"), 6);
    }

    #[test]
    fn grows_with_appended_text() {
        let base = "diff --git a/x b/x";
        let longer = format!("{base}\n+ one more");
        assert!(estimate(&longer) > estimate(base));
    }
}
