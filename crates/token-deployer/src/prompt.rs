//! Interactive questions for the inputs that were not passed as arguments.

use {
    crate::config::ConfigError,
    std::io::{BufRead, Write},
};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn terminal() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks once; an answer that is not a positive integer is an error.
    pub fn ask_count(&mut self) -> Result<usize, ConfigError> {
        let answer = self.ask("How many tokens do you want to deploy? ")?;
        crate::config::parse_count(&answer)
    }

    /// Asks until the answer is a positive decimal amount of Gwei and returns
    /// the price in wei.
    pub fn ask_gas_price(&mut self) -> Result<u128, ConfigError> {
        loop {
            let answer = self.ask("Gas price in Gwei: ")?;
            match crate::config::parse_gas_price(&answer) {
                Ok(wei) => return Ok(wei),
                Err(err) => {
                    writeln!(self.output, "Invalid gas price: {err}")
                        .map_err(ConfigError::Prompt)?;
                }
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<String, ConfigError> {
        write!(self.output, "{question}").map_err(ConfigError::Prompt)?;
        self.output.flush().map_err(ConfigError::Prompt)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(ConfigError::Prompt)?;
        if read == 0 {
            return Err(ConfigError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }
}
