//! Recursive-descent parser for the declaration subset.
//!
//! The parser produces a flat tree of [`Item`]s: namespaces with their
//! bodies, functions, variables and named types. Deciding which of those end
//! up in the [`hostmock_ir::ApiModel`] is left to the collector.

use hostmock_ir::{
    ApiMember, EnumDecl, EnumVariant, Field, Keyword, Literal, Param, TypeDecl, TypeExpr,
    TypeParam,
};
use miette::SourceSpan;

use crate::lexer::{Tok, Token};

#[derive(Debug, Clone)]
pub(crate) enum Item {
    Namespace {
        name: String,
        body: Vec<Item>,
    },
    Function {
        member: ApiMember,
        span: SourceSpan,
    },
    Variable {
        name: String,
        span: SourceSpan,
        ty: Option<TypeExpr>,
    },
    Interface(TypeDecl),
    Class(TypeDecl),
    Alias {
        name: String,
        target: TypeExpr,
    },
    Enum(EnumDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParseError {
    pub message: String,
    pub span: SourceSpan,
}

type PResult<T> = Result<T, ParseError>;

const DECL_MODIFIERS: &[&str] = &["declare", "default", "abstract", "async"];
const MEMBER_MODIFIERS: &[&str] = &[
    "readonly",
    "public",
    "private",
    "protected",
    "static",
    "abstract",
    "declare",
    "override",
    "accessor",
];
const PARAM_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

pub(crate) struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            src,
            tokens,
            pos: 0,
        }
    }

    /// Parse the whole file.
    pub fn parse_file(mut self) -> PResult<Vec<Item>> {
        self.parse_items(false)
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|t| t.is_punct(c))
    }

    fn at_ident(&self, name: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(name))
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.at_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, name: &str) -> bool {
        if self.at_ident(name) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> PResult<&'a Token> {
        match self.peek() {
            Some(t) if t.is_punct(c) => {
                self.pos += 1;
                Ok(t)
            }
            _ => Err(self.error_here(format!("expected '{}'", c))),
        }
    }

    fn expect_name(&mut self) -> PResult<(String, SourceSpan)> {
        match self.peek() {
            Some(Token {
                tok: Tok::Ident(name),
                ..
            }) => {
                let span = self.tokens[self.pos].span();
                self.pos += 1;
                Ok((name.clone(), span))
            }
            _ => Err(self.error_here("expected an identifier")),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let span = match self.peek() {
            Some(t) => t.span(),
            None => SourceSpan::from((self.src.len(), 0)),
        };
        let mut message = message.into();
        match self.peek() {
            Some(t) => message.push_str(&format!(", found '{}'", &self.src[t.start..t.end])),
            None => message.push_str(", found end of file"),
        }
        ParseError { message, span }
    }

    /// Source text from token `start` up to the last consumed token, with
    /// whitespace collapsed.
    fn text_from(&self, start: usize) -> String {
        let end = self.pos.max(start + 1).min(self.tokens.len());
        let (Some(first), Some(last)) = (self.tokens.get(start), self.tokens.get(end - 1)) else {
            return String::new();
        };
        self.src[first.start..last.end]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn continues_expression(tok: &Token) -> bool {
        match tok.tok {
            Tok::Arrow => true,
            Tok::Punct(c) => ",=.{([|&:<".contains(c),
            _ => false,
        }
    }

    /// Skip tokens up to (not including) a depth-0 stop character, an
    /// unmatched closer, or a line break that ends the statement.
    fn skip_to_boundary(&mut self, stops: &[char]) -> PResult<()> {
        let mut depth = 0usize;
        let mut consumed = 0usize;
        while let Some(t) = self.peek() {
            if depth == 0 {
                if let Tok::Punct(c) = t.tok
                    && (stops.contains(&c) || matches!(c, '}' | ')' | ']'))
                {
                    return Ok(());
                }
                if consumed > 0
                    && t.newline_before
                    && !Self::continues_expression(&self.tokens[self.pos - 1])
                {
                    return Ok(());
                }
            }
            match t.tok {
                Tok::Punct('(' | '[' | '{') => depth += 1,
                Tok::Punct(')' | ']' | '}') => depth -= 1,
                _ => {}
            }
            self.pos += 1;
            consumed += 1;
        }
        if depth > 0 {
            return Err(self.error_here("unbalanced brackets"));
        }
        Ok(())
    }

    /// Skip a bracketed group starting at the current opener.
    fn skip_balanced(&mut self) -> PResult<()> {
        let open = self.peek().map(|t| t.span());
        let mut depth = 0usize;
        while let Some(t) = self.bump() {
            match t.tok {
                Tok::Punct('(' | '[' | '{') => depth += 1,
                Tok::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(ParseError {
            message: "unclosed bracket".into(),
            span: open.unwrap_or_else(|| SourceSpan::from((self.src.len(), 0))),
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_items(&mut self, in_block: bool) -> PResult<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None if in_block => return Err(self.error_here("expected '}'")),
                None => break,
                Some(t) if t.is_punct('}') => {
                    if in_block {
                        break;
                    }
                    return Err(self.error_here("unexpected '}'"));
                }
                Some(t) if t.is_punct(';') => {
                    self.pos += 1;
                }
                Some(_) => items.extend(self.parse_item()?),
            }
        }
        Ok(items)
    }

    fn parse_item(&mut self) -> PResult<Vec<Item>> {
        while let Some(t) = self.peek() {
            match t.ident() {
                Some(m) if DECL_MODIFIERS.contains(&m) => {
                    self.pos += 1;
                }
                Some("export") => {
                    self.pos += 1;
                    // export =, export { .. }, export * from, export as namespace,
                    // export default <expression>
                    if let Some(next) = self.peek()
                        && (next.is_punct('=')
                            || next.is_punct('{')
                            || next.is_punct('*')
                            || next.is_ident("as")
                            || (next.is_ident("default") && !self.default_exports_declaration()))
                    {
                        self.skip_to_boundary(&[';'])?;
                        self.eat_punct(';');
                        return Ok(Vec::new());
                    }
                }
                _ => break,
            }
        }

        let Some(keyword) = self.peek().and_then(Token::ident) else {
            return Err(self.error_here("expected a declaration"));
        };

        match keyword {
            "import" => {
                self.skip_to_boundary(&[';'])?;
                self.eat_punct(';');
                Ok(Vec::new())
            }
            "namespace" | "module" => {
                self.pos += 1;
                self.parse_namespace()
            }
            "global" if self.peek_at(1).is_some_and(|t| t.is_punct('{')) => {
                self.pos += 1;
                self.expect_punct('{')?;
                let body = self.parse_items(true)?;
                self.expect_punct('}')?;
                Ok(body)
            }
            "function" => {
                self.pos += 1;
                Ok(vec![self.parse_function()?])
            }
            "const" if self.peek_at(1).is_some_and(|t| t.is_ident("enum")) => {
                self.pos += 2;
                Ok(vec![Item::Enum(self.parse_enum()?)])
            }
            "enum" => {
                self.pos += 1;
                Ok(vec![Item::Enum(self.parse_enum()?)])
            }
            "const" | "let" | "var" => {
                self.pos += 1;
                self.parse_variables()
            }
            "interface" => {
                self.pos += 1;
                Ok(vec![Item::Interface(self.parse_interface()?)])
            }
            "type" => {
                self.pos += 1;
                self.parse_alias()
            }
            "class" => {
                self.pos += 1;
                Ok(vec![Item::Class(self.parse_class()?)])
            }
            _ => Err(self.error_here("expected a declaration")),
        }
    }

    /// At `default` after `export`: does a declaration follow?
    fn default_exports_declaration(&self) -> bool {
        self.peek_at(1)
            .and_then(Token::ident)
            .is_some_and(|kw| {
                matches!(
                    kw,
                    "function" | "class" | "interface" | "abstract" | "async" | "enum" | "namespace"
                )
            })
    }

    fn parse_namespace(&mut self) -> PResult<Vec<Item>> {
        let name = if let Some(t) = self.peek()
            && let Tok::Str(name) = &t.tok
        {
            self.pos += 1;
            name.clone()
        } else {
            let (mut name, _) = self.expect_name()?;
            while self.at_punct('.') {
                self.pos += 1;
                let (part, _) = self.expect_name()?;
                name.push('.');
                name.push_str(&part);
            }
            name
        };

        // `declare module "x";` shorthand
        if !self.at_punct('{') {
            self.eat_punct(';');
            return Ok(vec![Item::Namespace {
                name,
                body: Vec::new(),
            }]);
        }

        self.expect_punct('{')?;
        let body = self.parse_items(true)?;
        self.expect_punct('}')?;
        Ok(vec![Item::Namespace { name, body }])
    }

    fn parse_function(&mut self) -> PResult<Item> {
        let (name, span) = self.expect_name()?;
        let type_params = self.parse_type_params()?;
        let params = self.parse_params()?;
        let returns = if self.eat_punct(':') {
            self.parse_type()?
        } else {
            TypeExpr::keyword(Keyword::Any)
        };
        if self.at_punct('{') {
            self.skip_balanced()?;
        }
        self.eat_punct(';');

        Ok(Item::Function {
            member: ApiMember {
                name,
                type_params,
                params,
                returns,
            },
            span,
        })
    }

    fn parse_variables(&mut self) -> PResult<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            let (name, span) = self.expect_name()?;
            self.eat_punct('!');
            let ty = if self.eat_punct(':') {
                Some(self.parse_type()?)
            } else {
                None
            };
            if self.eat_punct('=') {
                self.skip_to_boundary(&[',', ';'])?;
            }
            items.push(Item::Variable { name, span, ty });
            if !self.eat_punct(',') {
                break;
            }
        }
        self.eat_punct(';');
        Ok(items)
    }

    fn parse_interface(&mut self) -> PResult<TypeDecl> {
        let (name, _) = self.expect_name()?;
        self.parse_type_params()?;
        let mut decl = TypeDecl::new(name);
        if self.eat_ident("extends") {
            loop {
                decl.extends.push(self.parse_postfix()?);
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct('{')?;
        decl.fields = self.parse_members(false)?;
        self.expect_punct('}')?;
        Ok(decl)
    }

    fn parse_class(&mut self) -> PResult<TypeDecl> {
        let (name, _) = self.expect_name()?;
        self.parse_type_params()?;
        let mut decl = TypeDecl::new(name);
        if self.eat_ident("extends") {
            decl.extends.push(self.parse_postfix()?);
        }
        if self.eat_ident("implements") {
            loop {
                self.parse_postfix()?;
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct('{')?;
        decl.fields = self.parse_members(true)?;
        self.expect_punct('}')?;
        Ok(decl)
    }

    fn parse_alias(&mut self) -> PResult<Vec<Item>> {
        let (name, _) = self.expect_name()?;
        self.parse_type_params()?;
        self.expect_punct('=')?;
        let target = self.parse_type()?;
        self.eat_punct(';');
        Ok(vec![Item::Alias { name, target }])
    }

    fn parse_enum(&mut self) -> PResult<EnumDecl> {
        let (name, _) = self.expect_name()?;
        let mut decl = EnumDecl::new(name);
        self.expect_punct('{')?;
        loop {
            if self.eat_punct('}') {
                break;
            }
            let variant_name = match self.peek().map(|t| &t.tok) {
                Some(Tok::Ident(s) | Tok::Str(s)) => s.clone(),
                _ => return Err(self.error_here("expected an enum member")),
            };
            self.pos += 1;
            let mut variant = EnumVariant::new(variant_name);
            if self.eat_punct('=') {
                variant.value = self.parse_enum_initializer()?;
            }
            decl.variants.push(variant);
            if !self.eat_punct(',') {
                self.expect_punct('}')?;
                break;
            }
        }
        Ok(decl)
    }

    fn parse_enum_initializer(&mut self) -> PResult<Option<Literal>> {
        let start = self.pos;
        let literal = match (self.peek().map(|t| &t.tok), self.peek_at(1).map(|t| &t.tok)) {
            (Some(Tok::Str(s)), _) => Some(Literal::String(s.clone())),
            (Some(Tok::Num(n)), _) => Some(Literal::Number(n.clone())),
            (Some(Tok::Punct('-')), Some(Tok::Num(n))) => {
                self.pos += 1;
                Some(Literal::Number(format!("-{}", n)))
            }
            _ => None,
        };
        if literal.is_some() {
            self.pos += 1;
            // `1 << 2` and friends are computed, not literal
            if self.at_punct(',') || self.at_punct('}') {
                return Ok(literal);
            }
        }
        self.pos = start;
        self.skip_to_boundary(&[','])?;
        Ok(None)
    }

    fn parse_type_params(&mut self) -> PResult<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !self.eat_punct('<') {
            return Ok(params);
        }
        loop {
            if self.at_punct('>') {
                break;
            }
            // `const T`, `in T`, `out T`
            while let Some(m) = self.peek().and_then(Token::ident)
                && matches!(m, "const" | "in" | "out")
                && self.peek_at(1).is_some_and(|t| t.ident().is_some())
            {
                self.pos += 1;
            }
            let (name, _) = self.expect_name()?;
            let mut param = TypeParam::new(name);
            if self.eat_ident("extends") {
                param.constraint = Some(self.parse_type()?);
            }
            if self.eat_punct('=') {
                param.default = Some(self.parse_type()?);
            }
            params.push(param);
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct('>')?;
        Ok(params)
    }

    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.expect_punct('(')?;
        let mut params = Vec::new();
        loop {
            if self.eat_punct(')') {
                break;
            }
            while let Some(m) = self.peek().and_then(Token::ident)
                && PARAM_MODIFIERS.contains(&m)
                && self.peek_at(1).is_some_and(|t| {
                    t.ident().is_some() || t.is_punct('{') || t.is_punct('[') || t.tok == Tok::Ellipsis
                })
            {
                self.pos += 1;
            }

            let rest = if self.peek().is_some_and(|t| t.tok == Tok::Ellipsis) {
                self.pos += 1;
                true
            } else {
                false
            };

            let name = if self.at_punct('{') || self.at_punct('[') {
                let start = self.pos;
                self.skip_balanced()?;
                self.text_from(start)
            } else {
                self.expect_name()?.0
            };
            let optional = self.eat_punct('?');
            let ty = if self.eat_punct(':') {
                self.parse_type()?
            } else {
                TypeExpr::keyword(Keyword::Any)
            };
            if self.eat_punct('=') {
                self.skip_to_boundary(&[','])?;
            }

            // `this` parameters only annotate the receiver
            if !(name == "this" && !rest) {
                params.push(Param {
                    name,
                    ty,
                    optional,
                    rest,
                });
            }

            if !self.eat_punct(',') {
                self.expect_punct(')')?;
                break;
            }
        }
        Ok(params)
    }

    // =========================================================================
    // Object members
    // =========================================================================

    fn parse_members(&mut self, class_body: bool) -> PResult<Vec<Field>> {
        let mut fields = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error_here("expected '}'")),
                Some(t) if t.is_punct('}') => break,
                Some(t) if t.is_punct(';') || t.is_punct(',') => self.pos += 1,
                Some(_) => {
                    if let Some(field) = self.parse_member(class_body)? {
                        fields.push(field);
                    }
                }
            }
        }
        Ok(fields)
    }

    fn starts_member_name(tok: Option<&Token>) -> bool {
        tok.is_some_and(|t| {
            matches!(t.tok, Tok::Ident(_) | Tok::Str(_) | Tok::Num(_)) || t.is_punct('[') || t.is_punct('#')
        })
    }

    fn parse_member(&mut self, class_body: bool) -> PResult<Option<Field>> {
        let mut is_static = false;
        while let Some(m) = self.peek().and_then(Token::ident)
            && MEMBER_MODIFIERS.contains(&m)
            && Self::starts_member_name(self.peek_at(1))
        {
            is_static |= m == "static";
            self.pos += 1;
        }

        let mut accessor = None;
        if let Some(a) = self.peek().and_then(Token::ident)
            && matches!(a, "get" | "set")
            && Self::starts_member_name(self.peek_at(1))
        {
            accessor = Some(a);
            self.pos += 1;
        }

        let Some(tok) = self.peek() else {
            return Err(self.error_here("expected a member"));
        };
        let name = match &tok.tok {
            // index signatures, computed keys, call and construct signatures,
            // private names
            Tok::Punct('[' | '(' | '<' | '#') => {
                self.skip_to_boundary(&[';', ','])?;
                return Ok(None);
            }
            Tok::Ident(n)
                if n == "new"
                    && self
                        .peek_at(1)
                        .is_some_and(|t| t.is_punct('(') || t.is_punct('<')) =>
            {
                self.skip_to_boundary(&[';', ','])?;
                return Ok(None);
            }
            Tok::Ident(n) | Tok::Str(n) | Tok::Num(n) => n.clone(),
            _ => return Err(self.error_here("expected a member")),
        };
        self.pos += 1;

        let optional = self.eat_punct('?');
        self.eat_punct('!');

        let ty = if self.at_punct('(') || self.at_punct('<') {
            self.parse_type_params()?;
            let params = self.parse_params()?;
            let returns = if self.eat_punct(':') {
                self.parse_type()?
            } else {
                TypeExpr::keyword(Keyword::Any)
            };
            if class_body && self.at_punct('{') {
                self.skip_balanced()?;
            }
            match accessor {
                Some("get") => returns,
                Some(_) => return Ok(None),
                None => TypeExpr::function(params, returns),
            }
        } else if self.eat_punct(':') {
            self.parse_type()?
        } else {
            TypeExpr::keyword(Keyword::Any)
        };

        if self.eat_punct('=') {
            self.skip_to_boundary(&[';', ','])?;
        }

        if is_static || (class_body && name == "constructor") {
            return Ok(None);
        }

        Ok(Some(Field { name, ty, optional }))
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> PResult<TypeExpr> {
        let start = self.pos;
        let ty = self.parse_union()?;

        // conditional type: `T extends U ? X : Y`
        if self.peek().is_some_and(|t| t.is_ident("extends") && !t.newline_before) {
            self.pos += 1;
            self.parse_union()?;
            self.expect_punct('?')?;
            self.parse_type()?;
            self.expect_punct(':')?;
            self.parse_type()?;
            return Ok(TypeExpr::opaque(self.text_from(start)));
        }

        Ok(ty)
    }

    fn parse_union(&mut self) -> PResult<TypeExpr> {
        self.eat_punct('|');
        let mut variants = vec![self.parse_intersection()?];
        while self.eat_punct('|') {
            variants.push(self.parse_intersection()?);
        }
        Ok(if variants.len() == 1 {
            variants.remove(0)
        } else {
            TypeExpr::union(variants)
        })
    }

    fn parse_intersection(&mut self) -> PResult<TypeExpr> {
        self.eat_punct('&');
        let mut parts = vec![self.parse_postfix()?];
        while self.eat_punct('&') {
            parts.push(self.parse_postfix()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            TypeExpr::intersection(parts)
        })
    }

    fn parse_postfix(&mut self) -> PResult<TypeExpr> {
        let start = self.pos;
        let mut ty = self.parse_primary()?;
        while let Some(t) = self.peek()
            && t.is_punct('[')
            && !t.newline_before
        {
            if self.peek_at(1).is_some_and(|t| t.is_punct(']')) {
                self.pos += 2;
                ty = TypeExpr::array(ty);
            } else {
                // indexed access `T["key"]`
                self.pos += 1;
                self.parse_type()?;
                self.expect_punct(']')?;
                ty = TypeExpr::opaque(self.text_from(start));
            }
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> PResult<TypeExpr> {
        let start = self.pos;
        let Some(tok) = self.peek() else {
            return Err(self.error_here("expected a type"));
        };

        match &tok.tok {
            Tok::Str(s) => {
                self.pos += 1;
                Ok(TypeExpr::literal(Literal::String(s.clone())))
            }
            Tok::Num(n) => {
                self.pos += 1;
                Ok(TypeExpr::literal(Literal::Number(n.clone())))
            }
            Tok::Template(_) => {
                self.pos += 1;
                Ok(TypeExpr::opaque(self.text_from(start)))
            }
            Tok::Punct('-') => match self.peek_at(1).map(|t| &t.tok) {
                Some(Tok::Num(n)) => {
                    self.pos += 2;
                    Ok(TypeExpr::literal(Literal::Number(format!("-{}", n))))
                }
                _ => Err(self.error_here("expected a type")),
            },
            Tok::Punct('(') => {
                if self.paren_starts_function() {
                    self.parse_function_type(Vec::new())
                } else {
                    self.pos += 1;
                    let ty = self.parse_type()?;
                    self.expect_punct(')')?;
                    Ok(ty)
                }
            }
            Tok::Punct('<') => {
                let type_params = self.parse_type_params()?;
                self.parse_function_type(type_params)
            }
            Tok::Punct('{') => {
                if self.brace_starts_mapped_type() {
                    self.skip_balanced()?;
                    return Ok(TypeExpr::opaque(self.text_from(start)));
                }
                self.pos += 1;
                let fields = self.parse_members(false)?;
                self.expect_punct('}')?;
                Ok(TypeExpr::object(fields))
            }
            Tok::Punct('[') => self.parse_tuple(),
            Tok::Ident(name) => self.parse_named_or_keyword(name, start),
            _ => Err(self.error_here("expected a type")),
        }
    }

    fn parse_named_or_keyword(&mut self, name: &str, start: usize) -> PResult<TypeExpr> {
        let next = self.peek_at(1);
        match name {
            "true" | "false" => {
                self.pos += 1;
                return Ok(TypeExpr::literal(Literal::Boolean(name == "true")));
            }
            "typeof" => {
                self.pos += 1;
                if self.at_ident("import") {
                    self.pos += 1;
                    self.skip_balanced()?;
                } else {
                    self.expect_name()?;
                }
                while self.eat_punct('.') {
                    self.expect_name()?;
                }
                if self.at_punct('<') {
                    self.parse_type_args()?;
                }
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            "import" if next.is_some_and(|t| t.is_punct('(')) => {
                self.pos += 1;
                self.skip_balanced()?;
                while self.eat_punct('.') {
                    self.expect_name()?;
                }
                if self.at_punct('<') {
                    self.parse_type_args()?;
                }
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            "keyof" | "unique" | "infer" if next.is_some_and(|t| t.ident().is_some() || t.is_punct('(') || t.is_punct('{')) => {
                self.pos += 1;
                self.parse_postfix()?;
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            "readonly" if next.is_some_and(|t| t.ident().is_some() || t.is_punct('[') || t.is_punct('(')) => {
                self.pos += 1;
                return self.parse_postfix();
            }
            "new" if next.is_some_and(|t| t.is_punct('(') || t.is_punct('<')) => {
                self.pos += 1;
                let type_params = self.parse_type_params()?;
                self.parse_function_type(type_params)?;
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            "abstract" if next.is_some_and(|t| t.is_ident("new")) => {
                self.pos += 2;
                let type_params = self.parse_type_params()?;
                self.parse_function_type(type_params)?;
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            "asserts" if next.is_some_and(|t| t.ident().is_some() && !t.newline_before) => {
                self.pos += 2;
                if self.eat_ident("is") {
                    self.parse_type()?;
                }
                return Ok(TypeExpr::opaque(self.text_from(start)));
            }
            _ => {}
        }

        if let Some(keyword) = Keyword::from_ident(name)
            && !next.is_some_and(|t| t.is_punct('.'))
        {
            self.pos += 1;
            return Ok(TypeExpr::keyword(keyword));
        }

        self.pos += 1;
        let mut full = name.to_string();
        while self.at_punct('.') && self.peek_at(1).is_some_and(|t| t.ident().is_some()) {
            self.pos += 1;
            let (part, _) = self.expect_name()?;
            full.push('.');
            full.push_str(&part);
        }

        // type predicate `x is T`
        if self.peek().is_some_and(|t| t.is_ident("is") && !t.newline_before) {
            self.pos += 1;
            self.parse_type()?;
            return Ok(TypeExpr::opaque(self.text_from(start)));
        }

        let args = if self.at_punct('<') {
            self.parse_type_args()?
        } else {
            Vec::new()
        };
        Ok(TypeExpr::generic(full, args))
    }

    fn parse_type_args(&mut self) -> PResult<Vec<TypeExpr>> {
        self.expect_punct('<')?;
        let mut args = Vec::new();
        loop {
            if self.at_punct('>') {
                break;
            }
            args.push(self.parse_type()?);
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct('>')?;
        Ok(args)
    }

    fn parse_function_type(&mut self, type_params: Vec<TypeParam>) -> PResult<TypeExpr> {
        let params = self.parse_params()?;
        if !self.peek().is_some_and(|t| t.tok == Tok::Arrow) {
            return Err(self.error_here("expected '=>'"));
        }
        self.pos += 1;
        let returns = self.parse_type()?;
        Ok(TypeExpr::generic_function(type_params, params, returns))
    }

    fn parse_tuple(&mut self) -> PResult<TypeExpr> {
        let start = self.pos;
        self.expect_punct('[')?;
        let mut elements = Vec::new();
        let mut plain = true;
        loop {
            if self.eat_punct(']') {
                break;
            }
            if self.peek().is_some_and(|t| t.tok == Tok::Ellipsis) {
                self.pos += 1;
                plain = false;
            }
            // named member `[x: number, y?: number]`
            let labeled = self.peek().is_some_and(|t| t.ident().is_some())
                && match self.peek_at(1) {
                    Some(t) if t.is_punct(':') => true,
                    Some(t) if t.is_punct('?') => self.peek_at(2).is_some_and(|t| t.is_punct(':')),
                    _ => false,
                };
            if labeled {
                self.pos += 1;
                self.eat_punct('?');
                self.expect_punct(':')?;
                plain = false;
            }
            elements.push(self.parse_type()?);
            if self.eat_punct('?') {
                plain = false;
            }
            if !self.eat_punct(',') {
                self.expect_punct(']')?;
                break;
            }
        }
        if plain {
            Ok(TypeExpr::tuple(elements))
        } else {
            Ok(TypeExpr::opaque(self.text_from(start)))
        }
    }

    /// At `(`: is this the parameter list of a function type?
    fn paren_starts_function(&self) -> bool {
        let mut depth = 0usize;
        for (i, t) in self.tokens[self.pos..].iter().enumerate() {
            match t.tok {
                Tok::Punct('(' | '[' | '{') => depth += 1,
                Tok::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self
                            .tokens
                            .get(self.pos + i + 1)
                            .is_some_and(|t| t.tok == Tok::Arrow);
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// At `{`: is this a mapped type like `{ [K in keyof T]: V }`?
    fn brace_starts_mapped_type(&self) -> bool {
        let mut i = self.pos + 1;
        // optional `readonly`, `+readonly`, `-readonly`
        while self
            .tokens
            .get(i)
            .is_some_and(|t| t.is_ident("readonly") || t.is_punct('+') || t.is_punct('-'))
        {
            i += 1;
        }
        self.tokens.get(i).is_some_and(|t| t.is_punct('['))
            && self.tokens.get(i + 1).is_some_and(|t| t.ident().is_some())
            && self.tokens.get(i + 2).is_some_and(|t| t.is_ident("in"))
    }
}
