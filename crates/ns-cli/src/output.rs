//! Shared output helpers for human and JSON modes.
//!
//! Human mode prints the data itself to stdout. JSON mode wraps it in
//! `{ data, meta? }` and respects `--pretty`.

use anyhow::Result;
use serde_json::{Value, json};

use crate::opts::HomeOpts;

pub fn print_success(opts: &HomeOpts, data: Value, meta: Option<Value>) -> Result<()> {
    if opts.pretty || opts.json {
        print_json(opts, data, meta)
    } else {
        print_value(data)
    }
}

fn print_json(opts: &HomeOpts, data: Value, meta: Option<Value>) -> Result<()> {
    let mut root = json!({ "data": data });
    if let (Some(meta), Some(obj)) = (meta, root.as_object_mut()) {
        obj.insert("meta".into(), meta);
    }
    if opts.pretty {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        println!("{}", serde_json::to_string(&root)?);
    }
    Ok(())
}

fn print_value(value: Value) -> Result<()> {
    match value {
        Value::String(s) => println!("{s}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}
