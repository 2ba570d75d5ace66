//! GraphQL type references with their list and non-null wrappers.
//!
//! Wrappers are tracked as a value instead of being spliced into the type
//! name, so re-wrapping a reference can never produce something like
//! `String!!`.

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WrappingType {
    NonNull,
    List,
}

/// GraphQL wrappers encoded into a single u32
///
/// Bit 0: Whether the inner type is non-null
/// Bits 1..5: Number of list wrappers
/// Bits 5..20: List wrappers, innermost first, where 0 is nullable 1 is non-null
/// The rest: dead bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Wrapping(u32);

const INNER_NON_NULL_MASK: u32 = 1;
const NUM_LISTS_MASK: u32 = 0b1_1110;
const LIST_FLAGS_OFFSET: u32 = 5;
const MAX_LIST_WRAPPINGS: u32 = 15;

impl Wrapping {
    pub fn nullable() -> Self {
        Wrapping(0)
    }

    pub fn required() -> Self {
        Wrapping(INNER_NON_NULL_MASK)
    }

    #[must_use]
    pub fn wrap_list(self) -> Self {
        let list_count = self.list_count();
        assert!(list_count < MAX_LIST_WRAPPINGS, "list wrapper overflow");

        Wrapping(((list_count + 1) << 1) | (self.0 & !NUM_LISTS_MASK))
    }

    /// Marks the outermost type as non-null. Applying it twice is a no-op.
    #[must_use]
    pub fn wrap_non_null(self) -> Self {
        match self.list_count() {
            0 => Wrapping(self.0 | INNER_NON_NULL_MASK),
            list_count => Wrapping(self.0 | (1 << (LIST_FLAGS_OFFSET + list_count - 1))),
        }
    }

    pub fn is_required(self) -> bool {
        match self.list_count() {
            0 => self.is_inner_required(),
            list_count => self.is_list_required(list_count - 1),
        }
    }

    pub fn is_nullable(self) -> bool {
        !self.is_required()
    }

    pub fn is_list(self) -> bool {
        self.list_count() > 0
    }

    pub fn is_inner_required(self) -> bool {
        self.0 & INNER_NON_NULL_MASK != 0
    }

    pub fn list_count(self) -> u32 {
        (self.0 & NUM_LISTS_MASK) >> 1
    }

    /// Iterates over the wrappers from outermost to innermost.
    pub fn iter(self) -> impl Iterator<Item = WrappingType> {
        (0..self.list_count())
            .rev()
            .flat_map(move |index| {
                self.is_list_required(index)
                    .then_some(WrappingType::NonNull)
                    .into_iter()
                    .chain(std::iter::once(WrappingType::List))
            })
            .chain(self.is_inner_required().then_some(WrappingType::NonNull))
    }

    fn is_list_required(self, index: u32) -> bool {
        self.0 & (1 << (LIST_FLAGS_OFFSET + index)) != 0
    }
}

/// Takes wrappers from outermost to innermost
impl FromIterator<WrappingType> for Wrapping {
    fn from_iter<T: IntoIterator<Item = WrappingType>>(iter: T) -> Self {
        let wrappers = iter.into_iter().collect::<Vec<_>>();

        wrappers
            .into_iter()
            .rev()
            .fold(Wrapping::nullable(), |wrapping, wrapper| match wrapper {
                WrappingType::NonNull => wrapping.wrap_non_null(),
                WrappingType::List => wrapping.wrap_list(),
            })
    }
}

/// A reference to a named type in a GraphQL schema, e.g. `[String]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
    wrapping: Wrapping,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            wrapping: Wrapping::nullable(),
        }
    }

    /// The named type, without any wrappers.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrapping(&self) -> Wrapping {
        self.wrapping
    }

    #[must_use]
    pub fn wrap_list(self) -> Self {
        TypeRef {
            wrapping: self.wrapping.wrap_list(),
            ..self
        }
    }

    #[must_use]
    pub fn wrap_non_null(self) -> Self {
        TypeRef {
            wrapping: self.wrapping.wrap_non_null(),
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        self.wrapping.is_required()
    }

    pub fn is_list(&self) -> bool {
        self.wrapping.is_list()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrappers = self.wrapping.iter().collect::<Vec<_>>();

        for _ in wrappers.iter().filter(|wrapper| **wrapper == WrappingType::List) {
            f.write_str("[")?;
        }

        f.write_str(&self.name)?;

        for wrapper in wrappers.iter().rev() {
            match wrapper {
                WrappingType::NonNull => f.write_str("!")?,
                WrappingType::List => f.write_str("]")?,
            }
        }

        Ok(())
    }
}

impl serde::Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
