//! Built-in operators, installed once in the global frame.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::env::Frame;
use crate::error::{Error, Result};
use crate::list;
use crate::number::Number;
use crate::value::{Primitive, Value};

pub const TABLE: &[Primitive] = &[
    Primitive { name: "+", run: add },
    Primitive { name: "-", run: sub },
    Primitive { name: "*", run: mul },
    Primitive { name: "/", run: div },
    Primitive { name: "modulo", run: modulo },
    Primitive { name: "<", run: less_than },
    Primitive { name: ">", run: greater_than },
    Primitive { name: "=", run: num_eq },
    Primitive { name: "cons", run: prim_cons },
    Primitive { name: "car", run: prim_car },
    Primitive { name: "cdr", run: prim_cdr },
    Primitive { name: "null?", run: is_null },
];

pub fn install(globals: &Rc<RefCell<Frame>>) {
    let mut frame = globals.borrow_mut();
    for prim in TABLE {
        frame.define(prim.name, Value::Primitive(*prim));
    }
    debug!("installed {} primitives", TABLE.len());
}

fn expect_exactly(name: &'static str, args: &[Value], n: usize) -> Result<()> {
    if args.len() != n {
        return Err(Error::arity(name, n.to_string(), args.len()));
    }
    Ok(())
}

fn numbers(args: &[Value]) -> Result<Vec<Number>> {
    args.iter().map(Value::as_number).collect()
}

fn add(args: &[Value]) -> Result<Value> {
    let sum = numbers(args)?
        .into_iter()
        .fold(Number::Int(0), |acc, n| acc + n);
    Ok(sum.into())
}

fn sub(args: &[Value]) -> Result<Value> {
    expect_exactly("-", args, 2)?;
    let nums = numbers(args)?;
    Ok((nums[0] - nums[1]).into())
}

fn mul(args: &[Value]) -> Result<Value> {
    let product = numbers(args)?
        .into_iter()
        .fold(Number::Int(1), |acc, n| acc * n);
    Ok(product.into())
}

fn div(args: &[Value]) -> Result<Value> {
    expect_exactly("/", args, 2)?;
    let nums = numbers(args)?;
    nums[0]
        .checked_div(nums[1])
        .map(Value::from)
        .ok_or_else(|| Error::Type("division by zero".to_string()))
}

fn modulo(args: &[Value]) -> Result<Value> {
    expect_exactly("modulo", args, 2)?;
    let (a, b) = match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => (*a, *b),
        _ => return Err(Error::Type("modulo expects integer arguments".to_string())),
    };
    if b == 0 {
        return Err(Error::Type("division by zero".to_string()));
    }
    Ok(Value::Int(a % b))
}

fn less_than(args: &[Value]) -> Result<Value> {
    expect_exactly("<", args, 2)?;
    let nums = numbers(args)?;
    Ok(Value::Bool(nums[0] < nums[1]))
}

fn greater_than(args: &[Value]) -> Result<Value> {
    expect_exactly(">", args, 2)?;
    let nums = numbers(args)?;
    Ok(Value::Bool(nums[0] > nums[1]))
}

fn num_eq(args: &[Value]) -> Result<Value> {
    expect_exactly("=", args, 2)?;
    let nums = numbers(args)?;
    Ok(Value::Bool(nums[0] == nums[1]))
}

fn prim_cons(args: &[Value]) -> Result<Value> {
    expect_exactly("cons", args, 2)?;
    Ok(list::cons(args[0].clone(), args[1].clone()))
}

fn prim_car(args: &[Value]) -> Result<Value> {
    expect_exactly("car", args, 1)?;
    list::head(&args[0])
}

fn prim_cdr(args: &[Value]) -> Result<Value> {
    expect_exactly("cdr", args, 1)?;
    list::tail(&args[0])
}

fn is_null(args: &[Value]) -> Result<Value> {
    expect_exactly("null?", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Null)))
}
