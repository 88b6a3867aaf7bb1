//! Pipeline driver: load → lex → parse → bind, strictly in that order.

use std::{fs, time::Instant};

use anyhow::{Context, Result};

use crate::{
    cli::Cli,
    lexer::tokenize,
    parser::parse,
    semantics::scope::{Scope, bind_global_symbols},
};

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

pub fn run_compiler(cli: &Cli) -> Result<()> {
    let t_total = Instant::now();

    let t_load = Instant::now();
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;
    let load_ms = elapsed_ms(t_load);

    let t_lex = Instant::now();
    let tokens = tokenize(&source, &cli.file)?;
    let lex_ms = elapsed_ms(t_lex);

    if cli.tokens {
        for token in tokens.iter() {
            println!("{token}");
        }
    }

    let t_parse = Instant::now();
    let program = parse(tokens, &cli.file)?;
    let parse_ms = elapsed_ms(t_parse);

    if cli.ast {
        println!("=== AST ===");
        print!("{program}");
    }

    let t_bind = Instant::now();
    let mut global_scope = Scope::new();
    bind_global_symbols(&mut global_scope, &program)?;
    let bind_ms = elapsed_ms(t_bind);

    if cli.sym_table {
        println!("=== Symbol Table ===");
        print!("{global_scope}");
    }

    if cli.time {
        eprintln!(
            "Timings (ms): load={load_ms:.3} lex={lex_ms:.3} parse={parse_ms:.3} \
             symbol-table(global)={bind_ms:.3} total={:.3}",
            elapsed_ms(t_total)
        );
    }

    Ok(())
}
