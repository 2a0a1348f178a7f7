// Pratt expression parser.
//
// Binding powers come straight from `chsql_ast::precedence`, the same table
// the formatter uses to place parentheses. Lowest to highest:
//   OR
//   AND
//   NOT (prefix)
//   = != <> < <= > >=  IS [NOT] NULL  [NOT] LIKE/ILIKE/IN/BETWEEN
//   ||
//   + - (binary)
//   * / %
//   - + (unary prefix)
//   e[i] (postfix subscript)

use chsql_ast::{
    BinaryOp, ColumnRef, DataType, DataTypeArg, Expr, FrameBound, FrameUnits, FunctionArgs,
    FunctionCall, InSet, LikeOp, Literal, Placeholder, QualifiedName, UnaryOp, WhenClause,
    WindowFrame, WindowSpec,
};

use crate::error::{ParseError, Result, SyntaxError};
use crate::parser::Parser;
use crate::token::TokenKind;

// Binding powers: higher = tighter binding.
// Left BP is checked against min_bp; right BP is passed to the recursive call.
// Right = left + 1 makes every binary operator left-associative.
mod bp {
    use chsql_ast::precedence as p;

    pub const OR: (u8, u8) = (p::OR, p::OR + 1);
    pub const AND: (u8, u8) = (p::AND, p::AND + 1);
    pub const NOT_PREFIX: u8 = p::NOT;
    pub const COMPARISON: (u8, u8) = (p::COMPARISON, p::COMPARISON + 1);
    pub const CONCAT: (u8, u8) = (p::CONCAT, p::CONCAT + 1);
    pub const ADD: (u8, u8) = (p::ADDITIVE, p::ADDITIVE + 1);
    pub const MUL: (u8, u8) = (p::MULTIPLICATIVE, p::MULTIPLICATIVE + 1);
    pub const UNARY: u8 = p::UNARY;
    pub const SUBSCRIPT: u8 = p::POSTFIX;
}

/// BETWEEN bounds, LIKE patterns, interval values and frame offsets are
/// parsed just above the comparison level, so a following `AND` or
/// comparison operator closes them.
const OPERAND_BP: u8 = bp::COMPARISON.1;

impl Parser {
    /// Parse a single expression.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    // ── Pratt core ──────────────────────────────────────────────────────

    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.descend(|p| p.parse_expr_bp_inner(min_bp))
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> Result<Expr> {
        let lhs = self.parse_prefix()?;
        self.left_chain(|p, links| p.parse_operator_chain(lhs, min_bp, links))
    }

    fn parse_operator_chain(
        &mut self,
        mut lhs: Expr,
        min_bp: u8,
        links: &mut usize,
    ) -> Result<Expr> {
        loop {
            if self.check(&TokenKind::LeftBracket) {
                if bp::SUBSCRIPT < min_bp {
                    break;
                }
                self.add_link(links)?;
                self.advance();
                let index = self.parse_expr()?;
                self.expect_token(&TokenKind::RightBracket, "`]`")?;
                lhs = Expr::Subscript {
                    expr: Box::new(lhs),
                    index: Box::new(index),
                };
                continue;
            }

            if let Some((l_bp, r_bp)) = self.infix_bp() {
                if l_bp < min_bp {
                    break;
                }
                self.add_link(links)?;
                lhs = self.parse_infix(lhs, r_bp)?;
                continue;
            }

            break;
        }

        Ok(lhs)
    }

    // ── Prefix / primary ────────────────────────────────────────────────

    fn parse_prefix(&mut self) -> Result<Expr> {
        match self.peek() {
            TokenKind::KwNot => {
                self.advance();
                let expr = self.parse_expr_bp(bp::NOT_PREFIX)?;
                Ok(Expr::unary(UnaryOp::Not, expr))
            }
            TokenKind::Minus | TokenKind::Plus => {
                let op = if self.advance().kind == TokenKind::Minus {
                    UnaryOp::Minus
                } else {
                    UnaryOp::Plus
                };
                let expr = self.parse_expr_bp(bp::UNARY)?;
                Ok(Expr::unary(op, expr))
            }
            _ => self.parse_primary(),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn parse_primary(&mut self) -> Result<Expr> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Number(text) => Ok(Expr::Literal(Literal::Number(text))),
            TokenKind::String(value) => Ok(Expr::Literal(Literal::String(value))),
            TokenKind::KwTrue => Ok(Expr::Literal(Literal::Boolean(true))),
            TokenKind::KwFalse => Ok(Expr::Literal(Literal::Boolean(false))),
            TokenKind::KwNull => Ok(Expr::Literal(Literal::Null)),

            TokenKind::Question => Ok(Expr::Placeholder(Placeholder::Anonymous)),
            TokenKind::QuestionNum(n) => Ok(Expr::Placeholder(Placeholder::Numbered(n))),
            TokenKind::ColonParam(name) => Ok(Expr::Placeholder(Placeholder::Named(name))),
            TokenKind::DollarParam(name) => Ok(Expr::Placeholder(Placeholder::Dollar(name))),

            TokenKind::Id(name) | TokenKind::QuotedId(name) => self.parse_ident_expr(name),

            // LEFT / RIGHT double as string functions.
            TokenKind::KwLeft | TokenKind::KwRight if self.check(&TokenKind::LeftParen) => {
                self.parse_function_call(tok.text)
            }

            TokenKind::KwCase => self.parse_case_expr(),

            TokenKind::KwCast => {
                self.expect_token(&TokenKind::LeftParen, "`(`")?;
                let expr = self.parse_expr()?;
                self.expect_kw(&TokenKind::KwAs)?;
                let data_type = self.parse_data_type()?;
                self.expect_token(&TokenKind::RightParen, "`)`")?;
                Ok(Expr::Cast {
                    expr: Box::new(expr),
                    data_type,
                })
            }

            TokenKind::KwExists => {
                self.expect_token(&TokenKind::LeftParen, "`(`")?;
                let query = self.parse_query()?;
                self.expect_token(&TokenKind::RightParen, "`)`")?;
                Ok(Expr::Exists(Box::new(query)))
            }

            TokenKind::KwInterval => {
                let value = self.parse_expr_bp(OPERAND_BP)?;
                let unit = match self.peek() {
                    TokenKind::Id(unit) => unit.to_ascii_uppercase(),
                    _ => return Err(self.err_expected("interval unit")),
                };
                self.advance();
                Ok(Expr::Interval {
                    value: Box::new(value),
                    unit,
                })
            }

            TokenKind::LeftBracket => {
                let items = if self.check(&TokenKind::RightBracket) {
                    Vec::new()
                } else {
                    self.parse_comma_sep(Self::parse_expr)?
                };
                self.expect_token(&TokenKind::RightBracket, "`]`")?;
                Ok(Expr::Array(items))
            }

            TokenKind::LeftParen => {
                if matches!(self.peek(), TokenKind::KwSelect | TokenKind::KwWith) {
                    let query = self.parse_query()?;
                    self.expect_token(&TokenKind::RightParen, "`)`")?;
                    return Ok(Expr::Subquery(Box::new(query)));
                }
                let mut items = self.parse_comma_sep(Self::parse_expr)?;
                self.expect_token(&TokenKind::RightParen, "`)`")?;
                if items.len() == 1 {
                    Ok(items.remove(0))
                } else {
                    Ok(Expr::Tuple(items))
                }
            }

            _ => Err(ParseError::Syntax(SyntaxError {
                position: tok.position,
                expected: "expression".to_owned(),
                found: tok,
            })),
        }
    }

    /// An identifier starts a column reference (`c`, `t.c`, `db.t.c`) or,
    /// when followed by `(`, a function call.
    fn parse_ident_expr(&mut self, first: String) -> Result<Expr> {
        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(first);
        }
        if !self.eat(&TokenKind::Dot) {
            return Ok(Expr::Column(ColumnRef::bare(first)));
        }
        let second = self.parse_identifier()?;
        if !self.eat(&TokenKind::Dot) {
            return Ok(Expr::Column(ColumnRef::qualified(first, second)));
        }
        let column = self.parse_identifier()?;
        Ok(Expr::Column(ColumnRef {
            table: Some(QualifiedName::qualified(first, second)),
            column,
        }))
    }

    // ── Infix ───────────────────────────────────────────────────────────

    fn infix_bp(&self) -> Option<(u8, u8)> {
        match self.peek() {
            TokenKind::KwOr => Some(bp::OR),
            TokenKind::KwAnd => Some(bp::AND),

            TokenKind::Eq
            | TokenKind::EqEq
            | TokenKind::Ne
            | TokenKind::LtGt
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::KwIs
            | TokenKind::KwLike
            | TokenKind::KwIlike
            | TokenKind::KwBetween
            | TokenKind::KwIn => Some(bp::COMPARISON),

            // NOT LIKE / NOT ILIKE / NOT IN / NOT BETWEEN
            TokenKind::KwNot => match self.peek_nth(1) {
                TokenKind::KwLike | TokenKind::KwIlike | TokenKind::KwBetween | TokenKind::KwIn => {
                    Some(bp::COMPARISON)
                }
                _ => None,
            },

            TokenKind::Concat => Some(bp::CONCAT),
            TokenKind::Plus | TokenKind::Minus => Some(bp::ADD),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(bp::MUL),

            _ => None,
        }
    }

    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::KwOr => self.make_binop(lhs, BinaryOp::Or, r_bp),
            TokenKind::KwAnd => self.make_binop(lhs, BinaryOp::And, r_bp),
            TokenKind::Eq | TokenKind::EqEq => self.make_binop(lhs, BinaryOp::Eq, r_bp),
            TokenKind::Ne | TokenKind::LtGt => self.make_binop(lhs, BinaryOp::NotEq, r_bp),
            TokenKind::Lt => self.make_binop(lhs, BinaryOp::Lt, r_bp),
            TokenKind::Le => self.make_binop(lhs, BinaryOp::LtEq, r_bp),
            TokenKind::Gt => self.make_binop(lhs, BinaryOp::Gt, r_bp),
            TokenKind::Ge => self.make_binop(lhs, BinaryOp::GtEq, r_bp),
            TokenKind::Concat => self.make_binop(lhs, BinaryOp::Concat, r_bp),
            TokenKind::Plus => self.make_binop(lhs, BinaryOp::Plus, r_bp),
            TokenKind::Minus => self.make_binop(lhs, BinaryOp::Minus, r_bp),
            TokenKind::Star => self.make_binop(lhs, BinaryOp::Multiply, r_bp),
            TokenKind::Slash => self.make_binop(lhs, BinaryOp::Divide, r_bp),
            TokenKind::Percent => self.make_binop(lhs, BinaryOp::Modulo, r_bp),

            // ── IS [NOT] NULL ───────────────────────────────────────────
            TokenKind::KwIs => {
                let negated = self.eat_kw(&TokenKind::KwNot);
                self.expect_kw(&TokenKind::KwNull)?;
                Ok(Expr::IsNull {
                    expr: Box::new(lhs),
                    negated,
                })
            }

            TokenKind::KwLike => self.parse_like(lhs, LikeOp::Like, false),
            TokenKind::KwIlike => self.parse_like(lhs, LikeOp::ILike, false),
            TokenKind::KwBetween => self.parse_between(lhs, false),
            TokenKind::KwIn => self.parse_in(lhs, false),

            // infix_bp only admits NOT when one of these follows.
            _ => match self.advance().kind {
                TokenKind::KwLike => self.parse_like(lhs, LikeOp::Like, true),
                TokenKind::KwIlike => self.parse_like(lhs, LikeOp::ILike, true),
                TokenKind::KwBetween => self.parse_between(lhs, true),
                _ => self.parse_in(lhs, true),
            },
        }
    }

    fn make_binop(&mut self, lhs: Expr, op: BinaryOp, r_bp: u8) -> Result<Expr> {
        let rhs = self.parse_expr_bp(r_bp)?;
        Ok(Expr::binary(lhs, op, rhs))
    }

    // ── Special expression forms ────────────────────────────────────────

    fn parse_like(&mut self, lhs: Expr, op: LikeOp, negated: bool) -> Result<Expr> {
        let pattern = self.parse_expr_bp(OPERAND_BP)?;
        Ok(Expr::Like {
            expr: Box::new(lhs),
            op,
            pattern: Box::new(pattern),
            negated,
        })
    }

    fn parse_between(&mut self, lhs: Expr, negated: bool) -> Result<Expr> {
        // Bounds sit above AND so the separating AND is not consumed.
        let low = self.parse_expr_bp(OPERAND_BP)?;
        self.expect_kw(&TokenKind::KwAnd)?;
        let high = self.parse_expr_bp(OPERAND_BP)?;
        Ok(Expr::Between {
            expr: Box::new(lhs),
            low: Box::new(low),
            high: Box::new(high),
            negated,
        })
    }

    fn parse_in(&mut self, lhs: Expr, negated: bool) -> Result<Expr> {
        self.expect_token(&TokenKind::LeftParen, "`(`")?;
        let set = if matches!(self.peek(), TokenKind::KwSelect | TokenKind::KwWith) {
            InSet::Subquery(Box::new(self.parse_query()?))
        } else {
            InSet::List(self.parse_comma_sep(Self::parse_expr)?)
        };
        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(Expr::In {
            expr: Box::new(lhs),
            set,
            negated,
        })
    }

    fn parse_case_expr(&mut self) -> Result<Expr> {
        let operand = if self.check_kw(&TokenKind::KwWhen) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut whens = Vec::new();
        while self.eat_kw(&TokenKind::KwWhen) {
            let condition = self.parse_expr()?;
            self.expect_kw(&TokenKind::KwThen)?;
            let result = self.parse_expr()?;
            whens.push(WhenClause { condition, result });
        }
        if whens.is_empty() {
            return Err(self.err_expected("WHEN"));
        }

        let else_expr = if self.eat_kw(&TokenKind::KwElse) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_kw(&TokenKind::KwEnd)?;

        Ok(Expr::Case {
            operand,
            whens,
            else_expr,
        })
    }

    fn parse_function_call(&mut self, name: String) -> Result<Expr> {
        self.expect_token(&TokenKind::LeftParen, "`(`")?;

        let mut distinct = false;
        let args = if self.eat(&TokenKind::Star) {
            FunctionArgs::Star
        } else if self.check(&TokenKind::RightParen) {
            FunctionArgs::List(Vec::new())
        } else {
            distinct = self.eat_kw(&TokenKind::KwDistinct);
            FunctionArgs::List(self.parse_comma_sep(Self::parse_expr)?)
        };
        self.expect_token(&TokenKind::RightParen, "`)`")?;

        let over = if self.eat_word("OVER") {
            Some(self.parse_window_spec()?)
        } else {
            None
        };

        Ok(Expr::Function(FunctionCall {
            name,
            args,
            distinct,
            over,
        }))
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        self.expect_token(&TokenKind::LeftParen, "`(`")?;

        let partition_by = if self.eat_word("PARTITION") {
            self.expect_kw(&TokenKind::KwBy)?;
            self.parse_comma_sep(Self::parse_expr)?
        } else {
            Vec::new()
        };

        let order_by = if self.eat_kw(&TokenKind::KwOrder) {
            self.expect_kw(&TokenKind::KwBy)?;
            self.parse_comma_sep(Self::parse_ordering_term)?
        } else {
            Vec::new()
        };

        let units = if self.eat_word("ROWS") {
            Some(FrameUnits::Rows)
        } else if self.eat_word("RANGE") {
            Some(FrameUnits::Range)
        } else {
            None
        };
        let frame = units
            .map(|units| self.parse_window_frame(units))
            .transpose()?;

        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(WindowSpec {
            partition_by,
            order_by,
            frame,
        })
    }

    fn parse_window_frame(&mut self, units: FrameUnits) -> Result<WindowFrame> {
        if self.eat_kw(&TokenKind::KwBetween) {
            let start = self.parse_frame_bound()?;
            self.expect_kw(&TokenKind::KwAnd)?;
            let end = self.parse_frame_bound()?;
            Ok(WindowFrame {
                units,
                start,
                end: Some(end),
            })
        } else {
            Ok(WindowFrame {
                units,
                start: self.parse_frame_bound()?,
                end: None,
            })
        }
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        if self.eat_kw(&TokenKind::KwUnbounded) {
            if self.eat_word("PRECEDING") {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_word("FOLLOWING")?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.eat_kw(&TokenKind::KwCurrent) {
            self.expect_word("ROW")?;
            return Ok(FrameBound::CurrentRow);
        }
        let offset = Box::new(self.parse_expr_bp(OPERAND_BP)?);
        if self.eat_word("PRECEDING") {
            Ok(FrameBound::Preceding(offset))
        } else if self.eat_word("FOLLOWING") {
            Ok(FrameBound::Following(offset))
        } else {
            Err(self.err_expected("PRECEDING or FOLLOWING"))
        }
    }

    // ── Types ───────────────────────────────────────────────────────────

    /// `Name` or `Name(arg, ...)` where each arg is a number, a string or a
    /// nested type.
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType> {
        let name = match self.peek() {
            TokenKind::Id(s) | TokenKind::QuotedId(s) => s.clone(),
            _ => return Err(self.err_expected("data type")),
        };
        self.advance();

        let mut args = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            if !self.check(&TokenKind::RightParen) {
                args = self.parse_comma_sep(Self::parse_type_arg)?;
            }
            self.expect_token(&TokenKind::RightParen, "`)`")?;
        }
        Ok(DataType { name, args })
    }

    fn parse_type_arg(&mut self) -> Result<DataTypeArg> {
        match self.peek() {
            TokenKind::Number(n) => {
                let n = n.clone();
                self.advance();
                Ok(DataTypeArg::Number(n))
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(DataTypeArg::String(s))
            }
            TokenKind::Id(_) | TokenKind::QuotedId(_) => {
                Ok(DataTypeArg::Type(self.parse_data_type()?))
            }
            _ => Err(self.err_expected("type argument")),
        }
    }
}

/// Parse a single expression from raw SQL text. A trailing `;` is allowed.
pub fn parse_expr(sql: &str) -> Result<Expr> {
    let mut parser = Parser::from_sql(sql)?;
    let expr = parser.parse_expr()?;
    parser.eat(&TokenKind::Semicolon);
    if !parser.at_eof() {
        return Err(parser.err_expected("end of expression"));
    }
    Ok(expr)
}
