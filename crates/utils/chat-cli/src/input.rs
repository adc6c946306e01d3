//! Line input for the REPL and its prompts.
//!
//! One buffered reader lives for the whole session. Lines that arrive together
//! (pasted or piped) stay queued for the next read instead of being dropped
//! along with a short-lived buffer.

use std::io::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Input<R> {
    lines: Lines<R>,
}

impl Input<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next line without its terminator; `None` at end of input.
    pub async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(err) => {
                error!("error reading input: {}", err);
                None
            }
        }
    }

    pub async fn prompt(&mut self, question: &str) -> Option<String> {
        print!("{}", question);
        let _ = std::io::stdout().flush();
        self.next_line().await
    }

    /// Anything but `y`/`yes` declines, including end of input.
    pub async fn confirm(&mut self, question: &str) -> bool {
        self.prompt(question)
            .await
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}
