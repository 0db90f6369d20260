//! Quick benchmark of token substitution throughput

use create_project::materialize::substitute_tokens;
use create_project::Bindings;
use std::time::Instant;

fn main() {
    let bindings: Bindings = [
        ("name", "my-service"),
        ("author", "Ada Lovelace"),
        ("description", "A small service"),
        ("version", "0.1.0"),
    ]
    .into_iter()
    .collect();

    // Files of varying size and token density
    let files = vec![
        ("no tokens", "plain text without markers\n".repeat(200)),
        ("manifest", "name = \"@@NAME@@\"\nversion = \"@@VERSION@@\"\n".repeat(50)),
        (
            "readme",
            "# @@NAME@@\n\n@@DESCRIPTION@@\n\nMaintained by @@AUTHOR@@.\n".repeat(500),
        ),
    ];

    println!("Token Substitution Performance Test");
    println!("===================================\n");

    for (label, content) in &files {
        let iterations = 10_000;
        let start = Instant::now();

        for _ in 0..iterations {
            let _ = substitute_tokens(content, &bindings);
        }

        let elapsed = start.elapsed();
        let per_op = elapsed / iterations;

        println!("File: {:12} ({} bytes)", label, content.len());
        println!("  Time for {} iterations: {:?}", iterations, elapsed);
        println!("  Per operation: {:?}\n", per_op);
    }
}
