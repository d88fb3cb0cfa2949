use std::ops::Index;

#[cfg(feature = "pool-json")]
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Opaque index of a token inside a [`TokenPool`].
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

/// Shape of a pool token.
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Atom,
    List,
}

/// Atom payload category, mirroring [`NodeKind`].
///
/// [`NodeKind`]: crate::NodeKind
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomSubtype {
    Operator,
    Number,
    String,
    ContainerName,
    ContainerData,
}

/// One token of the flat Pool encoding.
///
/// `rest` chains siblings; `first` holds a List's contents or a
/// ContainerData atom's child modifiers. The `variable` bit flags atoms
/// bound to a named session variable. `subtype` is meaningful for atoms;
/// List tokens conventionally carry `Operator` for the chain they wrap.
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PoolToken {
    pub kind: TokenKind,
    pub subtype: AtomSubtype,
    pub text: SmolStr,
    pub first: Option<TokenId>,
    pub rest: Option<TokenId>,
    pub variable: bool,
}

impl PoolToken {
    pub fn atom(subtype: AtomSubtype, text: &str) -> Self {
        Self {
            kind: TokenKind::Atom,
            subtype,
            text: SmolStr::from(text),
            first: None,
            rest: None,
            variable: false,
        }
    }

    pub fn list(first: Option<TokenId>) -> Self {
        Self {
            kind: TokenKind::List,
            subtype: AtomSubtype::Operator,
            text: SmolStr::default(),
            first,
            rest: None,
            variable: false,
        }
    }

    pub fn with_rest(mut self, rest: Option<TokenId>) -> Self {
        self.rest = rest;
        self
    }

    pub fn with_first(mut self, first: Option<TokenId>) -> Self {
        self.first = first;
        self
    }

    pub fn with_variable(mut self, variable: bool) -> Self {
        self.variable = variable;
        self
    }
}

/// Append-only token store: tokens are never removed or relocated, so a
/// `TokenId` stays valid for the pool's lifetime.
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct TokenPool {
    tokens: Vec<PoolToken>,
}

impl TokenPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn alloc(&mut self, token: PoolToken) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token);
        id
    }

    /// Returns the token behind `id`, or `None` if out of range.
    pub fn get(&self, id: TokenId) -> Option<&PoolToken> {
        self.tokens.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &PoolToken)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (TokenId(i as u32), token))
    }
}

impl Index<TokenId> for TokenPool {
    type Output = PoolToken;

    /// # Panics
    ///
    /// Panics if `id` is out of range — pool ids come from this pool's
    /// own `alloc`, anything else is malformed data.
    fn index(&self, id: TokenId) -> &PoolToken {
        &self.tokens[id.0 as usize]
    }
}


#[cfg(all(test, feature = "pool-json"))]
mod json_tests {
    use super::*;

    #[test]
    fn test_token_pool_json_round_trip() {
        let mut pool = TokenPool::new();
        let arg = pool.alloc(PoolToken::atom(AtomSubtype::Number, "5"));
        pool.alloc(PoolToken::atom(AtomSubtype::Operator, "true").with_rest(Some(arg)));

        let json = serde_json::to_string(&pool).unwrap();
        let back: TokenPool = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), pool.len());
        assert_eq!(back[arg], pool[arg]);
    }
}
