//! Built-in example programs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Example {
    SumLoop,
    SumReduce,
    Fibonacci,
    Square,
    /// Loaded when a session starts.
    #[default]
    Error,
}

impl Example {
    pub const ALL: [Example; 5] = [
        Example::SumLoop,
        Example::SumReduce,
        Example::Fibonacci,
        Example::Square,
        Example::Error,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Example::SumLoop => "sumLoop",
            Example::SumReduce => "sumReduce",
            Example::Fibonacci => "fibonacci",
            Example::Square => "square",
            Example::Error => "error",
        }
    }

    pub const fn source(self) -> &'static str {
        match self {
            Example::SumLoop => {
                "var array = [0, 1, 2, 3, 4, 5],\n    sum = 0;\n\nfor (var i = 0; i < array.length; i++)\n  sum += array[i];"
            }
            Example::SumReduce => {
                "var array = [0, 1, 2, 3, 4, 5];\nvar sum = array.reduce(function(acc,  n) {\n  return acc + n;\n});"
            }
            Example::Fibonacci => {
                "function fibo(n) {\n  if (n <= 1)\n    return n;\n  return fibo(n - 1) + fibo(n - 2);\n}\n\nvar fib6 = fibo(6);"
            }
            Example::Square => {
                "var a = 1;\nvar b = 2;\n\nfunction square(a) {\n  var sq = a * a;\n  return sq;\n}\n\nvar s = square(b);"
            }
            Example::Error => {
                "var x = 1;\nfor (var i = 0; i < 5; i++) {\n  y += 1; // y is not defined => Error here\n  if (i == 3)\n    debugger;\n  x += i;\n}"
            }
        }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown example `{0}`")]
pub struct UnknownExample(pub String);

impl FromStr for Example {
    type Err = UnknownExample;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Example::ALL
            .into_iter()
            .find(|example| example.name() == s)
            .ok_or_else(|| UnknownExample(s.to_owned()))
    }
}
