use anyhow::Result;
use std::io::BufRead;

/// Read a streaming response line-by-line, reporting the text accumulated so
/// far after every chunk.
pub fn read_stream_to_string<R, F>(
    reader: R,
    mut parse_line: F,
    on_progress: &mut dyn FnMut(&str),
) -> Result<String>
where
    R: BufRead,
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut out = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(chunk) = parse_line(line)? {
            out.push_str(&chunk);
            on_progress(&out);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accumulates_chunks_and_reports_progress() {
        let body = "a\n\nb\nskip\nc\n";
        let mut seen = Vec::new();
        let out = read_stream_to_string(
            Cursor::new(body),
            |line| Ok((line != "skip").then(|| line.to_string())),
            &mut |partial| seen.push(partial.to_string()),
        )
        .unwrap();

        assert_eq!(out, "abc");
        assert_eq!(seen, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn parse_errors_propagate() {
        let result = read_stream_to_string(
            Cursor::new("bad\n"),
            |_| Err(anyhow::anyhow!("boom")),
            &mut |_| {},
        );
        assert!(result.is_err());
    }
}
