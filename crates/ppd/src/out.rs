use std::io::{self, Write};

use thiserror::Error;

/// Failure while producing a PPD document
#[derive(Debug, Error)]
pub enum PpdError {
    /// Underlying stream failure
    #[error("I/O error")]
    Io(#[from] io::Error),
    /// A `*CloseUI`/`*CloseGroup` that does not match the innermost open scope
    #[error("close of `{found}` does not match open `{expected}`")]
    Mismatch {
        /// the innermost open scope
        expected: String,
        /// the keyword passed to the close call
        found: String,
    },
    /// A close call with no open scope left
    #[error("`{0}` was closed but never opened")]
    NotOpen(String),
    /// `finish` was called while scopes were still open
    #[error("unclosed scopes at end of document: {0:?}")]
    Unclosed(Vec<String>),
}

#[derive(Debug, PartialEq, Eq)]
enum Scope {
    Ui(String),
    Group(String),
}

impl Scope {
    fn name(&self) -> &str {
        match self {
            Scope::Ui(n) => n,
            Scope::Group(n) => n,
        }
    }
}

/// Writes PPD directives to an [`io::Write`] stream.
///
/// Directives are always complete lines. `*OpenUI`/`*OpenGroup` pairs are
/// tracked on a stack, so unbalanced or interleaved groups are caught at
/// write time instead of by the spooler.
pub struct PpdWriter<W: Write> {
    inner: W,
    scopes: Vec<Scope>,
}

impl<W: Write> From<W> for PpdWriter<W> {
    fn from(inner: W) -> Self {
        Self {
            inner,
            scopes: Vec::new(),
        }
    }
}

impl<W: Write> PpdWriter<W> {
    /// `*PPD-Adobe: "4.3"`, the first line of every document
    pub fn magic(&mut self) -> Result<(), PpdError> {
        writeln!(self.inner, "*PPD-Adobe: \"4.3\"")?;
        Ok(())
    }

    /// `*%text`
    pub fn comment(&mut self, text: &str) -> Result<(), PpdError> {
        writeln!(self.inner, "*%{}", text)?;
        Ok(())
    }

    /// `*Key: value`
    pub fn attr(&mut self, key: &str, value: &str) -> Result<(), PpdError> {
        writeln!(self.inner, "*{}: {}", key, value)?;
        Ok(())
    }

    /// `*Key: "value"`
    pub fn quoted(&mut self, key: &str, value: &str) -> Result<(), PpdError> {
        writeln!(self.inner, "*{}: \"{}\"", key, value)?;
        Ok(())
    }

    /// `*DefaultKey: value`
    pub fn default_attr(&mut self, key: &str, value: &str) -> Result<(), PpdError> {
        writeln!(self.inner, "*Default{}: {}", key, value)?;
        Ok(())
    }

    /// `*Key choice/text:<TAB>"invocation"`
    pub fn option(
        &mut self,
        key: &str,
        choice: &str,
        text: &str,
        invocation: &str,
    ) -> Result<(), PpdError> {
        writeln!(self.inner, "*{} {}/{}:\t\"{}\"", key, choice, text, invocation)?;
        Ok(())
    }

    /// Like [`Self::option`] with a plain space before the invocation
    pub fn option_spaced(
        &mut self,
        key: &str,
        choice: &str,
        text: &str,
        invocation: &str,
    ) -> Result<(), PpdError> {
        writeln!(self.inner, "*{} {}/{}: \"{}\"", key, choice, text, invocation)?;
        Ok(())
    }

    /// A numeric choice in fixed-point thousandths with an empty invocation.
    ///
    /// The visible label is the value divided by 1000, to three decimals:
    /// `*stpGamma 250/0.250: ""`
    pub fn numeric_choice(&mut self, key: &str, thousandths: i32) -> Result<(), PpdError> {
        writeln!(
            self.inner,
            "*{} {}/{:.3}: \"\"",
            key,
            thousandths,
            f64::from(thousandths) * 0.001
        )?;
        Ok(())
    }

    /// `*OpenUI *Key: PickOne`, optionally with a translation text
    pub fn open_ui(&mut self, key: &str, text: Option<&str>) -> Result<(), PpdError> {
        match text {
            Some(text) => writeln!(self.inner, "*OpenUI *{}/{}: PickOne", key, text)?,
            None => writeln!(self.inner, "*OpenUI *{}: PickOne", key)?,
        }
        self.scopes.push(Scope::Ui(key.to_string()));
        Ok(())
    }

    /// `*CloseUI: *Key`
    pub fn close_ui(&mut self, key: &str) -> Result<(), PpdError> {
        self.pop(Scope::Ui(key.to_string()))?;
        writeln!(self.inner, "*CloseUI: *{}", key)?;
        Ok(())
    }

    /// `*OpenGroup: Name`
    pub fn open_group(&mut self, name: &str) -> Result<(), PpdError> {
        writeln!(self.inner, "*OpenGroup: {}", name)?;
        self.scopes.push(Scope::Group(name.to_string()));
        Ok(())
    }

    /// `*CloseGroup: Name`
    pub fn close_group(&mut self, name: &str) -> Result<(), PpdError> {
        self.pop(Scope::Group(name.to_string()))?;
        writeln!(self.inner, "*CloseGroup: {}", name)?;
        Ok(())
    }

    /// `*OrderDependency: order section *Key`
    pub fn order_dependency(
        &mut self,
        order: u32,
        section: &str,
        key: &str,
    ) -> Result<(), PpdError> {
        writeln!(self.inner, "*OrderDependency: {} {} *{}", order, section, key)?;
        Ok(())
    }

    /// `*Font Name: Status "(version)" Charset Location`
    pub fn font(
        &mut self,
        name: &str,
        status: &str,
        version: &str,
        charset: &str,
        location: &str,
    ) -> Result<(), PpdError> {
        writeln!(
            self.inner,
            "*Font {}: {} \"({})\" {} {}",
            name, status, version, charset, location
        )?;
        Ok(())
    }

    /// An empty separator line
    pub fn blank(&mut self) -> Result<(), PpdError> {
        writeln!(self.inner)?;
        Ok(())
    }

    /// Flush the stream and hand it back; fails if any scope is still open
    pub fn finish(mut self) -> Result<W, PpdError> {
        if !self.scopes.is_empty() {
            let open = self.scopes.iter().map(|s| s.name().to_string()).collect();
            return Err(PpdError::Unclosed(open));
        }
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn pop(&mut self, expected: Scope) -> Result<(), PpdError> {
        match self.scopes.pop() {
            Some(top) if top == expected => Ok(()),
            Some(top) => Err(PpdError::Mismatch {
                expected: top.name().to_string(),
                found: expected.name().to_string(),
            }),
            None => Err(PpdError::NotOpen(expected.name().to_string())),
        }
    }
}
