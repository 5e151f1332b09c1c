use maybe_data_type::{DataType, DataTypeRef, TypeName};
use maybe_layout::DataLayout;

use crate::{
    Chain, ChainError, Expr, Link,
    ShapeError::{self, *},
};

/// A link node of an expression, borrowed from the expression tree.
enum LinkAst<'e> {
    Field {
        owner: Option<&'e TypeName>,
        field: &'e str,
    },
    Call {
        owner: Option<&'e TypeName>,
        method: &'e str,
        args: &'e [Expr],
    },
}

impl LinkAst<'_> {
    fn name(&self) -> &str {
        match self {
            LinkAst::Field { field, .. } => field,
            LinkAst::Call { method, .. } => method,
        }
    }

    fn declared_owner(&self) -> Option<&TypeName> {
        match self {
            LinkAst::Field { owner, .. } | LinkAst::Call { owner, .. } => *owner,
        }
    }
}

/// Split `expr` into its root sub-expression and its links, root to leaf, resolving each
/// link's owner type against `layout`.
///
/// `input_type` is the type of the value the chain will be evaluated with. It is void when the
/// expression is expected to capture its own root.
pub fn decompose(
    layout: &DataLayout,
    input_type: &DataTypeRef,
    expr: &Expr,
) -> Result<Chain, ChainError> {
    decompose_impl(layout, input_type, expr).map_err(|error| ChainError::UnsupportedChainShape {
        source: expr.to_string(),
        error,
    })
}

fn decompose_impl(
    layout: &DataLayout,
    input_type: &DataTypeRef,
    expr: &Expr,
) -> Result<Chain, ShapeError> {
    let mut nodes = Vec::new();
    let root = member_chain(expr, &mut nodes);

    let root_type = match root {
        Expr::Constant { data_type, .. } => data_type.clone(),
        _ if input_type.is_void() => return Err(UnboundRoot),
        _ => input_type.clone(),
    };

    let mut owner_type = root_type.clone();
    let mut links = Vec::with_capacity(nodes.len());
    for node in nodes {
        let link = follow_link(layout, input_type, &owner_type, node)?;
        owner_type = link.result_type().clone();
        links.push(link);
    }

    Ok(Chain {
        source: expr.to_string(),
        input_type: input_type.clone(),
        root: root.clone(),
        root_type,
        links,
    })
}

/// Descend through owner sub-expressions, collecting link nodes in root-to-leaf order, and
/// return the root sub-expression.
fn member_chain<'e>(mut expr: &'e Expr, nodes: &mut Vec<LinkAst<'e>>) -> &'e Expr {
    loop {
        match expr {
            Expr::Field {
                object,
                owner,
                field,
            } => {
                nodes.push(LinkAst::Field {
                    owner: owner.as_ref(),
                    field,
                });
                expr = &**object;
            }
            Expr::Call {
                object,
                owner,
                method,
                args,
            } => {
                nodes.push(LinkAst::Call {
                    owner: owner.as_ref(),
                    method,
                    args,
                });
                expr = &**object;
            }
            Expr::Root | Expr::Constant { .. } => break,
        }
    }
    nodes.reverse();
    expr
}

fn follow_link(
    layout: &DataLayout,
    input_type: &DataTypeRef,
    owner_type: &DataTypeRef,
    node: LinkAst<'_>,
) -> Result<Link, ShapeError> {
    let owner = match owner_type.as_ref() {
        DataType::Object(name) => name,
        _ => {
            return Err(NotAnObject {
                link: node.name().to_string(),
                data_type: owner_type.clone(),
            })
        }
    };
    if let Some(declared) = node.declared_owner() {
        if declared != owner {
            return Err(OwnerMismatch {
                link: node.name().to_string(),
                expected: declared.clone(),
                actual: owner.clone(),
            });
        }
    }

    match node {
        LinkAst::Field { field, .. } => Ok(Link::Field {
            owner: owner.clone(),
            field: field.to_string(),
            data_type: layout.field_type(owner, field)?.clone(),
        }),
        LinkAst::Call { method, args, .. } => {
            let resolved = layout.method(owner, method)?;
            if args.len() != resolved.params.len() {
                return Err(ArgumentCount {
                    method: method.to_string(),
                    expected: resolved.params.len(),
                    actual: args.len(),
                });
            }
            let args = args
                .iter()
                .zip(&resolved.params)
                .enumerate()
                .map(|(index, (arg, param))| -> Result<Chain, ShapeError> {
                    let chain = decompose_impl(layout, input_type, arg)?;
                    let arg_type = chain.result_type();
                    // A void argument is always none, which every parameter accepts.
                    if !(arg_type.is_void() || param.accepts(arg_type)) {
                        return Err(ArgumentType {
                            method: method.to_string(),
                            index,
                            expected: param.clone(),
                            actual: arg_type.clone(),
                        });
                    }
                    Ok(chain)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Link::Call {
                owner: owner.clone(),
                name: method.to_string(),
                args,
                method: resolved.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use maybe_data_type::Value;
    use maybe_layout::LayoutLookupError;

    use super::*;

    fn layout() -> DataLayout {
        let mut layout = DataLayout::new();
        layout.define_type("Address", [("City", Arc::new(DataType::String))]);
        layout.define_type(
            "Person",
            [
                ("Address", DataType::object("Address")),
                ("Age", Arc::new(DataType::Int)),
            ],
        );
        layout.define_type("Account", [("Balance", Arc::new(DataType::Float))]);
        layout
            .define_method(
                &"Person".into(),
                "GetAccount",
                vec![Arc::new(DataType::Int)],
                DataType::object("Account"),
                |_, _| Value::None,
            )
            .unwrap();
        layout
    }

    fn person() -> DataTypeRef {
        DataType::object("Person")
    }

    fn shape_error(result: Result<Chain, ChainError>) -> ShapeError {
        match result {
            Ok(chain) => panic!("expected error, decomposed {:?}", chain),
            Err(ChainError::UnsupportedChainShape { error, .. }) => error,
        }
    }

    #[test]
    fn links_are_ordered_root_to_leaf() {
        let layout = layout();
        let expr = Expr::root()
            .call("GetAccount", vec![Expr::constant(1)])
            .field("Balance");
        let chain = decompose(&layout, &person(), &expr).unwrap();
        assert_eq!(chain.root, Expr::Root);
        assert_eq!(
            chain
                .links
                .iter()
                .map(|link| (link.owner().as_str(), link.name()))
                .collect::<Vec<_>>(),
            vec![("Person", "GetAccount"), ("Account", "Balance")]
        );
        assert_eq!(chain.result_type().as_ref(), &DataType::Float);
        assert_eq!(chain.source, "root.GetAccount(1).Balance");
    }

    #[test]
    fn bare_root_has_no_links() {
        let layout = layout();
        let chain = decompose(&layout, &person(), &Expr::root()).unwrap();
        assert!(chain.links.is_empty());
        assert_eq!(chain.result_type(), &person());

        let chain = decompose(&layout, &Arc::new(DataType::Void), &Expr::constant(4)).unwrap();
        assert!(chain.links.is_empty());
        assert_eq!(chain.result_type().as_ref(), &DataType::Int);
    }

    #[test]
    fn captured_root_ignores_input_type() {
        let layout = layout();
        let root = layout.new_object("Address", [("City", "Lyon")]).unwrap();
        let chain = decompose(
            &layout,
            &Arc::new(DataType::Void),
            &Expr::constant(root).field("City"),
        )
        .unwrap();
        assert_eq!(chain.links.len(), 1);
        assert_eq!(chain.links[0].owner().as_str(), "Address");
    }

    #[test]
    fn unbound_root() {
        let layout = layout();
        let error = shape_error(decompose(
            &layout,
            &Arc::new(DataType::Void),
            &Expr::root().field("Address"),
        ));
        assert!(matches!(error, UnboundRoot));
    }

    #[test]
    fn link_on_non_object() {
        let layout = layout();
        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().field("Age").field("Value"),
        ));
        assert!(matches!(error, NotAnObject { ref link, .. } if link == "Value"));

        let error = shape_error(decompose(
            &layout,
            &Arc::new(DataType::Void),
            &Expr::constant(()).field("Address"),
        ));
        assert!(matches!(error, NotAnObject { .. }));
    }

    #[test]
    fn declared_owner_must_match_previous_link() {
        let layout = layout();
        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().field("Address").field_of("Person", "Age"),
        ));
        assert!(matches!(
            error,
            OwnerMismatch { ref expected, ref actual, .. }
                if expected.as_str() == "Person" && actual.as_str() == "Address"
        ));

        let chain = decompose(
            &layout,
            &person(),
            &Expr::root().field_of("Person", "Address").field_of("Address", "City"),
        )
        .unwrap();
        assert_eq!(chain.links.len(), 2);
    }

    #[test]
    fn undefined_members() {
        let layout = layout();
        let error = shape_error(decompose(&layout, &person(), &Expr::root().field("Name")));
        assert!(matches!(
            error,
            ShapeError::LayoutLookupError(LayoutLookupError::UndefinedField { .. })
        ));
        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().call("GetName", vec![]),
        ));
        assert!(matches!(
            error,
            ShapeError::LayoutLookupError(LayoutLookupError::UndefinedMethod { .. })
        ));
    }

    #[test]
    fn call_arguments_are_checked() {
        let layout = layout();
        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().call("GetAccount", vec![]),
        ));
        assert!(matches!(
            error,
            ArgumentCount {
                expected: 1,
                actual: 0,
                ..
            }
        ));

        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().call("GetAccount", vec![Expr::constant("one")]),
        ));
        assert!(matches!(error, ArgumentType { index: 0, .. }));

        let chain = decompose(
            &layout,
            &person(),
            &Expr::root().call("GetAccount", vec![Expr::root().field("Age")]),
        )
        .unwrap();
        match &chain.links[0] {
            Link::Call { args, .. } => assert_eq!(args[0].links.len(), 1),
            link => panic!("expected call, found {}", link),
        }

        decompose(
            &layout,
            &person(),
            &Expr::root().call("GetAccount", vec![Expr::constant(())]),
        )
        .unwrap();
    }

    #[test]
    fn empty_array_argument_needs_a_type() {
        let mut layout = layout();
        let ints = DataType::array(Arc::new(DataType::Int));
        layout
            .define_method(
                &"Person".into(),
                "Sum",
                vec![ints.clone()],
                Arc::new(DataType::Int),
                |_, _| Value::None,
            )
            .unwrap();

        let error = shape_error(decompose(
            &layout,
            &person(),
            &Expr::root().call("Sum", vec![Expr::constant(Vec::<i64>::new())]),
        ));
        assert!(matches!(error, ArgumentType { index: 0, .. }));

        decompose(
            &layout,
            &person(),
            &Expr::root().call("Sum", vec![Expr::typed_constant(Vec::<i64>::new(), ints)]),
        )
        .unwrap();
    }

    #[test]
    fn long_chains_decompose_without_recursion() {
        let mut layout = DataLayout::new();
        layout.define_type("Node", [("Next", DataType::object("Node"))]);
        let expr = (0..2_000).fold(Expr::root(), |expr, _| expr.field("Next"));
        let chain = decompose(&layout, &DataType::object("Node"), &expr).unwrap();
        assert_eq!(chain.links.len(), 2_000);
        assert_eq!(chain.source.len(), "root".len() + 2_000 * ".Next".len());
    }
}
