use std::sync::Arc;

use maybe_data_type::{DataTypeRef, ObjectRef, TypeName, Value};

use crate::{Chain, EvalError, Evaluator, Expr, Link};

/// Produces the value of a chain's root sub-expression from the evaluator's input.
type RootFn = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Applies a single link to a present owner value. The second argument is the evaluator's
/// input, which call arguments are evaluated against.
type LinkFn = Box<dyn Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync>;

/// The composed body of an evaluator.
pub(crate) type Body = Arc<dyn Fn(&Value) -> Result<Value, EvalError> + Send + Sync>;

/// Fold a decomposed chain into a single null-safe evaluator.
///
/// Each link is guarded by a check that returns `Value::None` without touching the link when
/// its owner is none. The links are applied root to leaf in one loop, so evaluation stops at
/// the first absent value and stack depth does not grow with chain length.
pub fn compose(chain: Chain) -> Evaluator {
    let root = root_fn(&chain.root);

    let body: Body = if chain.links.is_empty() {
        Arc::new(move |input: &Value| -> Result<Value, EvalError> { Ok(root(input)) })
    } else {
        let source: Arc<str> = Arc::from(chain.source.as_str());
        let links: Vec<LinkFn> = chain.links.iter().map(link_fn).collect();
        Arc::new(move |input: &Value| -> Result<Value, EvalError> {
            let mut value = root(input);
            for (index, apply) in links.iter().enumerate() {
                if value.is_none() {
                    tracing::trace!(source = &*source, link = index, "short-circuit on none");
                    return Ok(Value::None);
                }
                value = apply(&value, input)?;
            }
            Ok(value)
        })
    };

    Evaluator::new(chain, body)
}

fn root_fn(root: &Expr) -> RootFn {
    match root {
        Expr::Constant { value, .. } => {
            let value = value.clone();
            Box::new(move |_input: &Value| value.clone())
        }
        _ => Box::new(|input: &Value| input.clone()),
    }
}

fn link_fn(link: &Link) -> LinkFn {
    match link {
        Link::Field {
            owner,
            field,
            data_type,
        } => {
            let owner = owner.clone();
            let field = field.clone();
            let data_type = data_type.clone();
            Box::new(move |value: &Value, _input: &Value| -> Result<Value, EvalError> {
                let object = receiver(&owner, &field, value)?;
                checked_result(&field, &data_type, object.field(&field))
            })
        }
        Link::Call {
            owner,
            name,
            args,
            method,
        } => {
            let owner = owner.clone();
            let name = name.clone();
            let method = method.clone();
            let args: Vec<Evaluator> = args.iter().cloned().map(compose).collect();
            Box::new(move |value: &Value, input: &Value| -> Result<Value, EvalError> {
                let object = receiver(&owner, &name, value)?;
                let args = args
                    .iter()
                    .map(|arg| arg.eval_unchecked(input))
                    .collect::<Result<Vec<_>, _>>()?;
                checked_result(&name, &method.return_type, method.invoke(object, &args))
            })
        }
    }
}

fn receiver<'v>(owner: &TypeName, link: &str, value: &'v Value) -> Result<&'v ObjectRef, EvalError> {
    let object = value.try_as_object()?;
    if object.type_name() != owner {
        return Err(EvalError::OwnerTypeMismatch {
            link: link.to_string(),
            expected: owner.clone(),
            actual: object.type_name().clone(),
        });
    }
    Ok(object)
}

fn checked_result(link: &str, data_type: &DataTypeRef, value: Value) -> Result<Value, EvalError> {
    if value.conforms_to(data_type) {
        Ok(value)
    } else {
        Err(EvalError::ResultTypeMismatch {
            link: link.to_string(),
            expected: data_type.clone(),
            actual: value,
        })
    }
}
