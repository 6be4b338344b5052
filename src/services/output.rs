use crate::domain::models::JsonOut;
use crate::errors::EkitError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Failure envelope mirroring `JsonOut`, carrying the stable error code.
pub fn print_error(json: bool, err: &anyhow::Error) {
    let code = err
        .downcast_ref::<EkitError>()
        .map(|e| e.code())
        .unwrap_or("ERROR");
    if json {
        let out = serde_json::json!({
            "ok": false,
            "error": { "code": code, "message": format!("{:#}", err) }
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_default()
        );
    } else {
        eprintln!("error[{}]: {:#}", code, err);
    }
}
