//! The slice of the scripting runtime the marshaller talks to.
//!
//! Hosts implement [`ScriptStack`] over their interpreter's argument stack.
//! [`ArgStack`] is a plain `Vec<Value>` implementation for hosts that copy
//! arguments out before calling in, and for tests.

use super::*;

/// Script-visible type of a value, named the way the interpreter names them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Boolean,
    Number,
    String,
    Table,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil     => "nil",
            Kind::Boolean => "boolean",
            Kind::Number  => "number",
            Kind::String  => "string",
            Kind::Table   => "table",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    /// Byte string; not necessarily UTF-8.
    String(Vec<u8>),
    /// Array part of a table, 1-based on the script side.
    Table(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match *self {
            Value::Nil        => Kind::Nil,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_)  => Kind::Number,
            Value::String(_)  => Kind::String,
            Value::Table(_)   => Kind::Table,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn numbers<I: IntoIterator<Item = f64>>(numbers: I) -> Self {
        Value::Table(numbers.into_iter().map(Value::Number).collect())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Boolean(b) }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self { Value::String(s.as_bytes().to_vec()) }
}

impl From<Vec<Value>> for Value {
    fn from(t: Vec<Value>) -> Self { Value::Table(t) }
}

/// Argument access and result pushing for one script call.
///
/// Positions are 1-based, as are sequence indices. Checks that fail return
/// `MarshalError::TypeMismatch`; raising it as a script error is the host's
/// job.
pub trait ScriptStack {
    /// `Kind::Nil` for positions past the last argument.
    fn kind_at(&self, pos: usize) -> Kind;

    fn check_integer(&self, pos: usize) -> Result<i64>;
    fn check_number(&self, pos: usize) -> Result<f64>;
    fn check_string(&self, pos: usize) -> Result<&[u8]>;

    fn is_sequence(&self, pos: usize) -> bool {
        self.kind_at(pos) == Kind::Table
    }

    /// Length of the sequence at `pos`; 0 if it isn't one.
    fn sequence_length(&self, pos: usize) -> usize;

    /// Element `index` of the sequence at `pos`; `Value::Nil` when absent.
    fn sequence_get(&self, pos: usize, index: usize) -> Value;

    fn push_number(&mut self, n: f64);
    fn push_bytes(&mut self, bytes: &[u8]);
    fn push_sequence(&mut self, numbers: Vec<f64>);
    fn push_nil(&mut self);
}

/// A call frame holding owned arguments and the results pushed so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgStack {
    args:    Vec<Value>,
    results: Vec<Value>,
}

impl ArgStack {
    pub fn new(args: Vec<Value>) -> Self {
        ArgStack { args, results: Vec::new() }
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn results(&self) -> &[Value] {
        &self.results
    }

    pub fn into_results(self) -> Vec<Value> {
        self.results
    }

    fn arg(&self, pos: usize) -> Option<&Value> {
        if pos == 0 { None } else { <[Value]>::get(&self.args, pos - 1) }
    }

    fn mismatch(&self, pos: usize, expected: Kind) -> MarshalError {
        MarshalError::type_mismatch(pos, expected, self.kind_at(pos))
    }
}

impl ScriptStack for ArgStack {
    fn kind_at(&self, pos: usize) -> Kind {
        self.arg(pos).map_or(Kind::Nil, Value::kind)
    }

    fn check_integer(&self, pos: usize) -> Result<i64> {
        match self.arg(pos) {
            Some(&Value::Number(n)) => Ok(n as i64),
            _ => Err(self.mismatch(pos, Kind::Number)),
        }
    }

    fn check_number(&self, pos: usize) -> Result<f64> {
        match self.arg(pos) {
            Some(&Value::Number(n)) => Ok(n),
            _ => Err(self.mismatch(pos, Kind::Number)),
        }
    }

    fn check_string(&self, pos: usize) -> Result<&[u8]> {
        match self.arg(pos) {
            Some(Value::String(bytes)) => Ok(bytes.as_slice()),
            _ => Err(self.mismatch(pos, Kind::String)),
        }
    }

    fn sequence_length(&self, pos: usize) -> usize {
        match self.arg(pos) {
            Some(Value::Table(elems)) => elems.len(),
            _ => 0,
        }
    }

    fn sequence_get(&self, pos: usize, index: usize) -> Value {
        match self.arg(pos) {
            Some(Value::Table(elems)) if index > 0 => {
                <[Value]>::get(elems, index - 1).cloned().unwrap_or(Value::Nil)
            }
            _ => Value::Nil,
        }
    }

    fn push_number(&mut self, n: f64) {
        self.results.push(Value::Number(n));
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.results.push(Value::String(bytes.to_vec()));
    }

    fn push_sequence(&mut self, numbers: Vec<f64>) {
        self.results.push(Value::numbers(numbers));
    }

    fn push_nil(&mut self) {
        self.results.push(Value::Nil);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_report_position_and_kinds() {
        let stack = ArgStack::new(vec![Value::from(true), Value::from("abc")]);
        assert_eq!(
            stack.check_number(1),
            Err(MarshalError::type_mismatch(1, Kind::Number, Kind::Boolean)),
        );
        assert_eq!(
            stack.check_integer(3),
            Err(MarshalError::type_mismatch(3, Kind::Number, Kind::Nil)),
        );
        assert_eq!(stack.check_string(2), Ok(&b"abc"[..]));
    }

    #[test]
    fn test_check_integer_truncates() {
        let stack = ArgStack::new(vec![Value::from(5126.9), Value::from(-2.5)]);
        assert_eq!(stack.check_integer(1), Ok(5126));
        assert_eq!(stack.check_integer(2), Ok(-2));
    }

    #[test]
    fn test_sequence_access_is_one_based() {
        let stack = ArgStack::new(vec![Value::numbers(vec![10.0, 20.0])]);
        assert!(stack.is_sequence(1));
        assert!(!stack.is_sequence(2));
        assert_eq!(stack.sequence_length(1), 2);
        assert_eq!(stack.sequence_get(1, 0), Value::Nil);
        assert_eq!(stack.sequence_get(1, 1), Value::Number(10.0));
        assert_eq!(stack.sequence_get(1, 2), Value::Number(20.0));
        assert_eq!(stack.sequence_get(1, 3), Value::Nil);
    }

    #[test]
    fn test_pushes_collect_in_order() {
        let mut stack = ArgStack::default();
        stack.push_number(1.5);
        stack.push_nil();
        stack.push_bytes(b"\x01\x02");
        stack.push_sequence(vec![3.0]);
        assert_eq!(stack.into_results(), vec![
            Value::Number(1.5),
            Value::Nil,
            Value::String(vec![1, 2]),
            Value::Table(vec![Value::Number(3.0)]),
        ]);
    }
}
