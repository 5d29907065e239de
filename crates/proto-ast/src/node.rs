//! Node and node-id types for the proto concrete syntax tree.

use proto_position_tracking::ByteSpan;

/// Identifies a node within an [`crate::Ast`] arena.
///
/// Nodes never hold a parent pointer (see the "parent chain without
/// back-pointers" design note) — ancestry is always the explicit path a
/// visitor carries while walking the tree (§4.2's [`crate::walk`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// The syntactic kind of a node.
///
/// This is the sum-type substitution for the source grammar's runtime type
/// assertions on interface values (§9): every place the distilled spec says
/// "the same identifier token may denote X or Y" becomes a `match` arm over
/// this enum plus the ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Syntax,
    Package,
    Import,
    Message,
    Enum,
    EnumValue,
    Service,
    Rpc,
    RpcType,
    Extend,
    Field,
    MapField,
    MapType,
    Group,
    Oneof,
    ExtensionRange,
    Reserved,
    Option,
    OptionName,
    CompactOptions,
    MessageLiteral,
    MessageField,
    FieldReference,
    ArrayLiteral,
    Ident,
    CompoundIdent,
    Rune,
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    Error,
    Empty,
    /// A synthetic node inserted by a virtual document or repair pass; never
    /// produced by a real parse, but needed so C6's backward scan can filter
    /// it out uniformly with real wrapper nodes (§4.3 Phase A).
    WrapperNode,
}

impl NodeKind {
    /// Whether this kind is one of the "recognized scope kinds" the
    /// path-intersecting-location finder (§4.2) tests for containment.
    pub fn is_scope_kind(self) -> bool {
        matches!(
            self,
            NodeKind::Import
                | NodeKind::Syntax
                | NodeKind::Message
                | NodeKind::Enum
                | NodeKind::EnumValue
                | NodeKind::Service
                | NodeKind::Rpc
                | NodeKind::Extend
                | NodeKind::Option
                | NodeKind::MessageLiteral
                | NodeKind::OptionName
                | NodeKind::MessageField
                | NodeKind::CompactOptions
                | NodeKind::Field
                | NodeKind::FieldReference
                | NodeKind::RpcType
                | NodeKind::Package
                | NodeKind::Error
        )
    }

    /// Whether this kind can never bind to a descriptor on its own (§4.3
    /// Phase A short-circuit list).
    pub fn never_binds(self) -> bool {
        matches!(
            self,
            NodeKind::Syntax
                | NodeKind::Package
                | NodeKind::Empty
                | NodeKind::Rune
                | NodeKind::IntLiteral
                | NodeKind::FloatLiteral
        )
    }
}

/// A named, semantically distinguished child slot on a node — e.g. a
/// message's `Name` child versus its `CloseBrace` terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedChild {
    Name,
    Semicolon,
    CloseBrace,
    Close,
    CloseBracket,
    CloseParen,
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: ByteSpan,
    pub children: Vec<NodeId>,
    pub(crate) named: Vec<(NamedChild, NodeId)>,
    /// Set on `Rune` nodes inserted by error recovery rather than lexed from
    /// source (§4.2: "If the terminator is virtual ... use the inclusive
    /// span").
    pub virtual_rune: bool,
    /// Lexeme text for leaf nodes (`Ident`, `StringLiteral`, numeric
    /// literals); `None` for structural nodes.
    pub text: Option<String>,
}

impl Node {
    pub fn named_child(&self, which: NamedChild) -> Option<NodeId> {
        self.named.iter().find(|(k, _)| *k == which).map(|(_, id)| *id)
    }

    pub fn set_named_child(&mut self, which: NamedChild, id: NodeId) {
        self.named.retain(|(k, _)| *k != which);
        self.named.push((which, id));
    }

    /// The terminator node, if any, in precedence order `;`, `}`, `]`, `)`.
    pub fn terminator(&self) -> Option<(NamedChild, NodeId)> {
        for which in [
            NamedChild::Semicolon,
            NamedChild::CloseBrace,
            NamedChild::CloseBracket,
            NamedChild::CloseParen,
            NamedChild::Close,
        ] {
            if let Some(id) = self.named_child(which) {
                return Some((which, id));
            }
        }
        None
    }
}
