//! Textual rendering of trees
//!
//! Nodes render as `Kind[field=value, ...]`, lists as `[a, b]` and missing
//! children as `null`. Positions are not rendered; compare them separately.

use crate::ast::{
    Arguments, Call, ClassDef, Decorator, Expr, ExprKind, FunctionDef, Keyword, Module, NameTok,
    Stmt, StmtKind, StrLit, Suite,
};
use std::fmt::{self, Display, Formatter};

struct List<'items, T>(&'items [T]);

impl<T: Display> Display for List<'_, T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{item}")?;
        }
        formatter.write_str("]")
    }
}

struct Opt<'item, T>(Option<&'item T>);

impl<T: Display> Display for Opt<'_, T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(item) => write!(formatter, "{item}"),
            None => formatter.write_str("null"),
        }
    }
}

struct OptList<'items, T>(&'items [Option<T>]);

impl<T: Display> Display for OptList<'_, T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{}", Opt(item.as_ref()))?;
        }
        formatter.write_str("]")
    }
}

impl Display for Module {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Module[body={}]", List(&self.body))
    }
}

impl Display for Suite {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Suite[body={}]", List(&self.body))
    }
}

impl Display for NameTok {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "NameTok[id={}, ctx={}]", self.id, self.ctx)
    }
}

impl Display for Keyword {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "keyword[arg={}, value={}]", self.arg, self.value)
    }
}

impl Display for Decorator {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "decorator[func={}, args={}, keywords={}, starargs={}, kwargs={}, isCall={}]",
            self.func,
            List(&self.args),
            List(&self.keywords),
            Opt(self.starargs.as_ref()),
            Opt(self.kwargs.as_ref()),
            self.is_call
        )
    }
}

impl Display for Arguments {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "arguments[args={}, vararg={}, kwarg={}, defaults={}, kwonlyargs={}, kw_defaults={}, annotation={}, kwonlyargannotation={}]",
            List(&self.args),
            Opt(self.vararg.as_ref()),
            Opt(self.kwarg.as_ref()),
            OptList(&self.defaults),
            List(&self.kwonlyargs),
            OptList(&self.kw_defaults),
            OptList(&self.annotations),
            OptList(&self.kwonly_annotations)
        )
    }
}

impl Display for FunctionDef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "FunctionDef[name={}, args={}, body={}, decs={}, async={}]",
            self.name,
            self.args,
            List(&self.body),
            List(&self.decorators),
            self.is_async
        )
    }
}

impl Display for ClassDef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "ClassDef[name={}, bases={}, body={}, decs={}]",
            self.name,
            List(&self.bases),
            List(&self.body),
            List(&self.decorators)
        )
    }
}

impl Display for Stmt {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Assign { targets, value } => {
                write!(formatter, "Assign[targets={}, value={value}]", List(targets))
            }
            StmtKind::AugAssign { target, op, value } => {
                write!(formatter, "AugAssign[target={target}, op={op}, value={value}]")
            }
            StmtKind::Expr(value) => write!(formatter, "Expr[value={value}]"),
            StmtKind::Pass => formatter.write_str("Pass"),
            StmtKind::If { test, body, orelse } => write!(
                formatter,
                "If[test={test}, body={}, orelse={}]",
                List(body),
                Opt(orelse.as_ref())
            ),
            StmtKind::While { test, body, orelse } => write!(
                formatter,
                "While[test={test}, body={}, orelse={}]",
                List(body),
                Opt(orelse.as_ref())
            ),
            StmtKind::For {
                target,
                iter,
                body,
                orelse,
                is_async,
            } => write!(
                formatter,
                "For[target={target}, iter={iter}, body={}, orelse={}, async={is_async}]",
                List(body),
                Opt(orelse.as_ref())
            ),
            StmtKind::Assert { test, msg } => {
                write!(formatter, "Assert[test={test}, msg={}]", Opt(msg.as_ref()))
            }
            StmtKind::Return { value } => {
                write!(formatter, "Return[value={}]", Opt(value.as_ref()))
            }
            StmtKind::FunctionDef(def) => write!(formatter, "{def}"),
            StmtKind::ClassDef(def) => write!(formatter, "{def}"),
        }
    }
}

impl Display for StrLit {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Str[s={}, unicode={}, raw={}, binary={}, fstring={}, fstring_nodes={}]",
            self.s,
            self.unicode,
            self.raw,
            self.binary,
            self.fstring,
            List(&self.fstring_nodes)
        )
    }
}

impl Display for Call {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Call[func={}, args={}, keywords={}, starargs={}, kwargs={}]",
            self.func,
            List(&self.args),
            List(&self.keywords),
            Opt(self.starargs.as_deref()),
            Opt(self.kwargs.as_deref())
        )
    }
}

impl Display for Expr {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Name { id, ctx, reserved } => {
                write!(formatter, "Name[id={id}, ctx={ctx}, reserved={reserved}]")
            }
            ExprKind::Num(value) => write!(formatter, "Num[n={value}, type=Int]"),
            ExprKind::Str(lit) => write!(formatter, "{lit}"),
            ExprKind::Tuple {
                elts,
                ctx,
                ends_with_comma,
            } => write!(
                formatter,
                "Tuple[elts={}, ctx={ctx}, endsWithComma={ends_with_comma}]",
                List(elts)
            ),
            ExprKind::List { elts, ctx } => {
                write!(formatter, "List[elts={}, ctx={ctx}]", List(elts))
            }
            ExprKind::Set { elts } => write!(formatter, "Set[elts={}]", List(elts)),
            ExprKind::Dict { keys, values } => {
                write!(formatter, "Dict[keys={}, values={}]", List(keys), List(values))
            }
            ExprKind::Call(call) => write!(formatter, "{call}"),
            ExprKind::BinOp { left, op, right } => {
                write!(formatter, "BinOp[left={left}, op={op}, right={right}]")
            }
            ExprKind::BoolOp { op, values } => {
                write!(formatter, "BoolOp[op={op}, values={}]", List(values))
            }
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => write!(
                formatter,
                "Compare[left={left}, ops={}, comparators={}]",
                List(ops),
                List(comparators)
            ),
            ExprKind::IfExp { test, body, orelse } => {
                write!(formatter, "IfExp[test={test}, body={body}, orelse={orelse}]")
            }
            ExprKind::Await { value } => write!(formatter, "Await[value={value}]"),
            ExprKind::Yield { value } => {
                write!(formatter, "Yield[value={}]", Opt(value.as_deref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, ExprContext, Module, Position, Stmt, StmtKind};
    use expect_test::expect;

    #[test]
    fn test_render_assignment() {
        let target = Expr::name("a", ExprContext::Store, Position::new(1, 1));
        let value = Expr::int("10", Position::new(1, 5));
        let module = Module::new(vec![Stmt::new(
            StmtKind::Assign {
                targets: vec![target],
                value,
            },
            Position::new(1, 5),
        )]);

        expect![[r#"Module[body=[Assign[targets=[Name[id=a, ctx=Store, reserved=false]], value=Num[n=10, type=Int]]]]"#]]
            .assert_eq(&module.to_string());
    }

    #[test]
    fn test_render_missing_children_as_null() {
        let stmt = Stmt::new(StmtKind::Return { value: None }, Position::UNKNOWN);
        assert_eq!(stmt.to_string(), "Return[value=null]");
    }
}
