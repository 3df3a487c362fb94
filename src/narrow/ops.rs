//! Closed registry of narrowing primitives.
//! The macro generates the op enum together with its name and arity tables,
//! so the three stay in one place.

macro_rules! def_ops {
    ( $( $variant:ident => $name:literal / $arity:literal ),* $(,)? ) => {
        /// A narrowing primitive recognized by the kernel. The set is closed;
        /// hosts address ops by these values or by the wire names accepted by
        /// [`Op::from_name`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Op {
            $( $variant, )*
        }

        impl Op {
            pub const ALL: &'static [Op] = &[ $( Op::$variant, )* ];
            pub const COUNT: usize = Op::ALL.len();

            pub fn name(self) -> &'static str {
                match self {
                    $( Op::$variant => $name, )*
                }
            }

            pub fn from_name(name: &str) -> Option<Op> {
                match name {
                    $( $name => Some(Op::$variant), )*
                    _ => None,
                }
            }

            /// Length of the interval tuple the op narrows.
            pub fn arity(self) -> usize {
                match self {
                    $( Op::$variant => $arity, )*
                }
            }
        }
    };
}

def_ops! {
    Integral => "integral" / 1,
    Eq => "eq" / 3,
    Ne => "ne" / 3,
    Le => "le" / 3,
    Lt => "lt" / 3,
    Sub => "sub" / 3,
    Add => "add" / 3,
    Mul => "mul" / 3,
    Min => "min" / 3,
    Max => "max" / 3,
    Abs => "abs" / 2,
    Minus => "minus" / 2,
    Exp => "exp" / 2,
    Pow => "pow" / 3,
    Sin => "sin" / 2,
    Cos => "cos" / 2,
    Tan => "tan" / 2,
    Not => "not" / 2,
    And => "and" / 3,
    Or => "or" / 3,
    Xor => "xor" / 3,
    Nand => "nand" / 3,
    Nor => "nor" / 3,
    Implies => "imB" / 3,
}

/// Per-call flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Params {
    /// The relation's truth is already settled; extra endpoint tightening
    /// may apply.
    pub persistent: bool,
}

impl Params {
    pub const NONE: Params = Params { persistent: false };
    pub const PERSISTENT: Params = Params { persistent: true };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &op in Op::ALL {
            assert_eq!(Op::from_name(op.name()), Some(op));
        }
        assert_eq!(Op::from_name("imB"), Some(Op::Implies));
        assert_eq!(Op::from_name("integral"), Some(Op::Integral));
        assert_eq!(Op::from_name("divide"), None);
        assert_eq!(Op::from_name(""), None);
    }

    #[test]
    fn arities() {
        assert_eq!(Op::Integral.arity(), 1);
        assert_eq!(Op::Minus.arity(), 2);
        assert_eq!(Op::Add.arity(), 3);
        assert!(Op::ALL.iter().all(|op| (1..=3).contains(&op.arity())));
    }
}
