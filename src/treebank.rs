//! Reading of columnar treebanks: one `index word tag governor` line per token,
//! sentences separated by blank lines
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::deptree::{DepTree, Edge, Token};
use crate::error::ParserError;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

/// Parses one token line into its token and governing edge.
/// `expected_idx` is the position the token must occupy in the sentence.
fn parse_line(line: &str, line_no: usize, expected_idx: usize) -> Result<(Token, Edge), ParserError> {
  regex_static!(TOKEN_LINE, r"^\s*(\d+)\s+(\S+)\s+(\S+)\s+(\d+)\s*$");

  let malformed = || ParserError::MalformedInput {
    line: line_no,
    content: line.to_string(),
  };

  let caps = TOKEN_LINE.captures(line).ok_or_else(malformed)?;
  let idx = caps[1].parse::<usize>().map_err(|_| malformed())?;
  let governor = caps[4].parse::<usize>().map_err(|_| malformed())?;
  if idx != expected_idx {
    return Err(malformed());
  }

  Ok((Token::new(&caps[2], &caps[3]), Edge::new(governor, idx)))
}

/// Streams sentences out of a treebank. A malformed line fails only the sentence it is in:
/// the rest of that sentence is skipped, and iteration resumes with the next one.
pub struct TreebankReader<R> {
  lines: Lines<R>,
  line_no: usize,
}

impl<R: BufRead> TreebankReader<R> {
  pub fn new(reader: R) -> Self {
    Self {
      lines: reader.lines(),
      line_no: 0,
    }
  }

  fn next_line(&mut self) -> Option<Result<String, ParserError>> {
    let line = self.lines.next()?;
    self.line_no += 1;
    Some(line.map_err(ParserError::from))
  }

  fn skip_sentence(&mut self) {
    while let Some(Ok(line)) = self.next_line() {
      if line.trim().is_empty() {
        return;
      }
    }
  }
}

impl<R: BufRead> Iterator for TreebankReader<R> {
  type Item = Result<DepTree, ParserError>;

  fn next(&mut self) -> Option<Self::Item> {
    let mut tree = DepTree::default();

    loop {
      let line = match self.next_line() {
        None => break,
        Some(Err(e)) => return Some(Err(e)),
        Some(Ok(line)) => line,
      };

      if line.trim().is_empty() {
        if !tree.is_empty() {
          break;
        }
        continue;
      }

      match parse_line(&line, self.line_no, tree.len()) {
        Ok((token, edge)) => {
          tree.tokens.push(token);
          tree.edges.push(edge);
        }
        Err(e) => {
          self.skip_sentence();
          return Some(Err(e));
        }
      }
    }

    if tree.is_empty() {
      None
    } else {
      Some(Ok(tree.with_context()))
    }
  }
}

/// Reads a whole treebank, failing on the first malformed sentence
pub fn read_treebank<R: BufRead>(reader: R) -> Result<Vec<DepTree>, ParserError> {
  TreebankReader::new(reader).collect()
}

pub fn read_treebank_file(path: impl AsRef<Path>) -> Result<Vec<DepTree>, ParserError> {
  read_treebank(BufReader::new(File::open(path)?))
}

impl FromStr for DepTree {
  type Err = ParserError;

  /// Parses the first sentence of a treebank string
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    TreebankReader::new(s.as_bytes())
      .next()
      .unwrap_or_else(|| {
        Err(ParserError::MalformedInput {
          line: 0,
          content: String::new(),
        })
      })
  }
}
