/*!
 * Interactive confirmation.
 *
 * Every prompt prints a `### <question> (y/n) : y` header followed by its
 * context lines and reads one answer line. An empty answer, end of input,
 * `y` or `Y` mean yes. The prompter is generic over its streams so the
 * workflow can be driven from a script or a test buffer.
 */

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// Yes/no rule shared by every confirmation
pub fn is_affirmative(input: &str) -> bool {
    let answer = input.trim_end_matches(['\r', '\n']);
    answer.is_empty() || answer == "y" || answer == "Y"
}

/// Line-oriented prompter over an input and an output stream
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Answer yes to every confirmation without reading input
    assume_yes: bool,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process stdin and stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
        }
    }

    /// Answer yes to every confirmation
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Print a line to the output stream
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()
    }

    /// Print `question` and read one trimmed answer line (empty at end of input)
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        self.say(&format!("### {}", question))?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// Print `question` with its context lines and read a yes/no answer
    pub fn confirm(&mut self, question: &str, context: &[&str]) -> io::Result<bool> {
        self.say(&format!("### {} (y/n) : y", question))?;
        for line in context {
            self.say(line)?;
        }

        if self.assume_yes {
            return Ok(true);
        }

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }

    /// Ask for the translation document id
    pub fn ask_document_id(&mut self) -> io::Result<String> {
        self.ask("Input the translation document id :")
    }

    /// Ask whether to merge into the file derived from the document URI
    pub fn confirm_file(&mut self, file: &str) -> io::Result<bool> {
        self.confirm("Proceed with this file?", &[file])
    }

    /// Ask whether to replace `current` file text with `translated`
    pub fn confirm_merge(&mut self, current: &str, translated: &str) -> io::Result<bool> {
        self.confirm("Merge this sentence?", &[current, translated])
    }

    /// Ask whether to write the merged content back to `file`
    pub fn confirm_overwrite(&mut self, file: &str) -> io::Result<bool> {
        self.confirm("Overwrite the file?", &[file])
    }

    /// Output stream, for inspection
    pub fn output(&self) -> &W {
        &self.output
    }
}
