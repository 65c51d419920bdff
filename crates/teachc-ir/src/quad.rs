//! Quadruple IR emitter: a depth-first walk of a [`teachc_par::Ast`] that
//! lowers binary expressions, atoms, assignment, `if`, and `while` into a
//! flat three-address instruction list.
//!
//! The emitter never inspects a grammar directly — it only pattern-matches
//! on node labels and the shape of `children`, so it works for any grammar
//! whose `Stmt`/`Expr` nonterminals and `if`/`then`/`else`/`while`/`do`/`:=`
//! terminals follow the schema's naming.

use std::fmt;

use teachc_par::{Ast, AstNode, AstNodeId};
use teachc_util::{IndexVec, Symbol};

teachc_util::define_idx!(TempId);
teachc_util::define_idx!(LabelId);

/// One operand or result slot of a [`Quadruple`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Temp(TempId),
    Label(LabelId),
    Name(Symbol),
    Literal(String),
    /// An unused slot, rendered as `_`.
    Empty,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(t) => write!(f, "t{}", t.0),
            Operand::Label(l) => write!(f, "L{}", l.0),
            Operand::Name(s) => write!(f, "{}", s.as_str()),
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Empty => write!(f, "_"),
        }
    }
}

/// The operator of a [`Quadruple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Eq,
    Ne,
    Goto,
    IfGotoFalse,
    Label,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Op::Assign => "assign",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Lt => "<",
            Op::Le => "\u{2264}",
            Op::Eq => "=",
            Op::Ne => "\u{2260}",
            Op::Goto => "goto",
            Op::IfGotoFalse => "if-goto-false",
            Op::Label => "label",
        };
        write!(f, "{text}")
    }
}

fn op_for_operator_lexeme(lexeme: &str) -> Option<Op> {
    Some(match lexeme {
        "+" => Op::Add,
        "-" => Op::Sub,
        "*" => Op::Mul,
        "/" => Op::Div,
        "<" => Op::Lt,
        "\u{2264}" | "<=" => Op::Le,
        "=" | "==" => Op::Eq,
        "\u{2260}" | "!=" => Op::Ne,
        _ => return None,
    })
}

/// `(op, arg1, arg2, result)`. `arg1`/`arg2`/`result` default to
/// [`Operand::Empty`] when a schema leaves a slot unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadruple {
    pub op: Op,
    pub arg1: Operand,
    pub arg2: Operand,
    pub result: Operand,
}

impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.op, self.arg1, self.arg2, self.result)
    }
}

/// Emits quadruples for one AST in traversal order. `temp_counter` and
/// `label_counter` are private to the pass and reset per top-level unit by
/// constructing a fresh `IrEmitter`.
#[derive(Debug)]
pub struct IrEmitter {
    temp_counter: u32,
    label_counter: u32,
    pub quads: Vec<Quadruple>,
}

impl Default for IrEmitter {
    fn default() -> Self {
        Self {
            temp_counter: 1,
            label_counter: 1,
            quads: Vec::new(),
        }
    }
}

impl IrEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_temp(&mut self) -> TempId {
        let id = TempId(self.temp_counter);
        self.temp_counter += 1;
        id
    }

    fn fresh_label(&mut self) -> LabelId {
        let id = LabelId(self.label_counter);
        self.label_counter += 1;
        id
    }

    fn emit(&mut self, op: Op, arg1: Operand, arg2: Operand, result: Operand) {
        self.quads.push(Quadruple { op, arg1, arg2, result });
    }

    /// Emit one top-level `Stmt` and return the accumulated quadruple list.
    pub fn emit_unit(mut self, ast: &Ast, node: AstNodeId) -> Vec<Quadruple> {
        self.emit_stmt(ast, node);
        self.quads
    }

    fn node(ast: &Ast, id: AstNodeId) -> &AstNode {
        &ast.nodes[id]
    }

    /// `Expr -> Expr op Expr` / `Expr -> id|number|string|char`. Leaves
    /// return their value directly; a 3-child `Expr` node
    /// recurses on its outer children and allocates a fresh temp for the
    /// operator in the middle.
    fn eval_expr(&mut self, ast: &Ast, node: AstNodeId) -> Operand {
        let n = Self::node(ast, node);
        if n.children.is_empty() {
            return match n.label.as_str() {
                "id" => Operand::Name(Symbol::intern(n.value.as_deref().unwrap_or_default())),
                _ => Operand::Literal(n.value.clone().unwrap_or_default()),
            };
        }
        if n.children.len() == 1 {
            return self.eval_expr(ast, n.children[0]);
        }
        if n.children.len() == 3 {
            let left = n.children[0];
            let op_leaf = n.children[1];
            let right = n.children[2];
            if let Some(op) = op_for_operator_lexeme(Self::node(ast, op_leaf).label.as_str()) {
                let a1 = self.eval_expr(ast, left);
                let a2 = self.eval_expr(ast, right);
                let temp = self.fresh_temp();
                self.emit(op, a1, a2, Operand::Temp(temp));
                return Operand::Temp(temp);
            }
            // A parenthesized `( Expr )` production: the middle child is the
            // value, the leaves are punctuation.
            return self.eval_expr(ast, op_leaf);
        }
        // Unrecognized shape: fall through on the first child so a caller's
        // AST with extra wrapping still yields something rather than panic.
        self.eval_expr(ast, n.children[0])
    }

    /// `Stmt -> id := Expr | if Expr then Stmt [else Stmt] | while Expr do Stmt`.
    fn emit_stmt(&mut self, ast: &Ast, node: AstNodeId) {
        let n = Self::node(ast, node);
        if n.children.is_empty() {
            return;
        }
        let first_label = Self::node(ast, n.children[0]).label.as_str();
        match first_label {
            "if" => self.emit_if(ast, &n.children),
            "while" => self.emit_while(ast, &n.children),
            _ => self.emit_assign(ast, &n.children),
        }
    }

    fn emit_assign(&mut self, ast: &Ast, children: &[AstNodeId]) {
        let id_name = Self::node(ast, children[0]).value.clone().unwrap_or_default();
        let expr_node = children[children.len() - 1];
        let value = self.eval_expr(ast, expr_node);
        self.emit(Op::Assign, value, Operand::Empty, Operand::Name(Symbol::intern(&id_name)));
    }

    fn emit_if(&mut self, ast: &Ast, children: &[AstNodeId]) {
        let condition = self.eval_expr(ast, children[1]);
        let then_body = children[3];
        let else_body = children.get(5).copied();

        let l_else = self.fresh_label();
        let l_end = self.fresh_label();
        self.emit(Op::IfGotoFalse, condition, Operand::Empty, Operand::Label(l_else));
        self.emit_stmt(ast, then_body);
        self.emit(Op::Goto, Operand::Empty, Operand::Empty, Operand::Label(l_end));
        self.emit(Op::Label, Operand::Empty, Operand::Empty, Operand::Label(l_else));
        if let Some(else_body) = else_body {
            self.emit_stmt(ast, else_body);
        }
        self.emit(Op::Label, Operand::Empty, Operand::Empty, Operand::Label(l_end));
    }

    fn emit_while(&mut self, ast: &Ast, children: &[AstNodeId]) {
        let l_start = self.fresh_label();
        let l_end = self.fresh_label();
        self.emit(Op::Label, Operand::Empty, Operand::Empty, Operand::Label(l_start));
        let condition = self.eval_expr(ast, children[1]);
        self.emit(Op::IfGotoFalse, condition, Operand::Empty, Operand::Label(l_end));
        self.emit_stmt(ast, children[3]);
        self.emit(Op::Goto, Operand::Empty, Operand::Empty, Operand::Label(l_start));
        self.emit(Op::Label, Operand::Empty, Operand::Empty, Operand::Label(l_end));
    }
}

/// Emit quadruples for `ast.root`, treating it as a single top-level `Stmt`.
pub fn emit(ast: &Ast) -> Vec<Quadruple> {
    IrEmitter::new().emit_unit(ast, ast.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teachc_par::{automaton, driver, grammar, sets, AstNode};
    use teachc_lex::{Token, TokenKind};

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    /// `x := (a + 3) * b`, tokenized by hand against a small Pascal-like
    /// assignment/expression grammar, must emit exactly three quadruples
    /// in the expected temp/operand order.
    #[test]
    fn assignment_of_parenthesized_expression_emits_expected_quadruples() {
        let grammar = grammar::load(
            "Stmt -> id := Expr\n\
             Expr -> Expr + T | T\n\
             T -> T * F | F\n\
             F -> ( Expr ) | id | number\n",
        )
        .unwrap();
        let symbol_sets = sets::compute(&grammar);
        let tables = automaton::build(&grammar, &symbol_sets, automaton::LrMode::Lr0Slr1);

        let tokens = vec![
            tok(TokenKind::Identifier, "x"),
            tok(TokenKind::Operator, ":="),
            tok(TokenKind::Delimiter, "("),
            tok(TokenKind::Identifier, "a"),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::LiteralInt, "3"),
            tok(TokenKind::Delimiter, ")"),
            tok(TokenKind::Operator, "*"),
            tok(TokenKind::Identifier, "b"),
            tok(TokenKind::Eof, ""),
        ];
        let outcome = driver::parse(&tokens, &grammar, &symbol_sets, &tables);
        assert!(outcome.errors.is_empty());
        let ast = outcome.ast.expect("well-formed input must parse");

        let quads = emit(&ast);
        let rendered: Vec<String> = quads.iter().map(|q| q.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "(+, a, 3, t1)".to_string(),
                "(*, t1, b, t2)".to_string(),
                "(assign, t2, _, x)".to_string(),
            ]
        );
    }

    #[test]
    fn temp_and_label_counters_reset_per_emitter_instance() {
        let mut first = IrEmitter::new();
        let mut nodes: IndexVec<AstNodeId, AstNode> = IndexVec::new();
        let a = nodes.push(AstNode::leaf(Symbol::intern("id"), "a"));
        let b = nodes.push(AstNode::leaf(Symbol::intern("number"), "1"));
        let plus = nodes.push(AstNode::leaf(Symbol::intern("+"), "+"));
        let expr = nodes.push(AstNode::internal(
            Symbol::intern("Expr"),
            teachc_par::ProductionId(1),
            vec![a, plus, b],
        ));
        let first_temp = first.eval_expr(&Ast { nodes, root: expr }, expr);
        assert_eq!(first_temp, Operand::Temp(TempId(1)));

        let mut nodes2: IndexVec<AstNodeId, AstNode> = IndexVec::new();
        let a2 = nodes2.push(AstNode::leaf(Symbol::intern("id"), "a"));
        let b2 = nodes2.push(AstNode::leaf(Symbol::intern("number"), "1"));
        let plus2 = nodes2.push(AstNode::leaf(Symbol::intern("+"), "+"));
        let expr2 = nodes2.push(AstNode::internal(
            Symbol::intern("Expr"),
            teachc_par::ProductionId(1),
            vec![a2, plus2, b2],
        ));
        let mut second = IrEmitter::new();
        let second_temp = second.eval_expr(&Ast { nodes: nodes2, root: expr2 }, expr2);
        assert_eq!(second_temp, Operand::Temp(TempId(1)));
    }
}
