//! Example: Decode the built-in demo inputs and display results
//!
//! Run with: cargo run -p reqlens --example decode_samples
//!
//! This example walks through each supported input shape.

use reqlens::samples::{BARE_JSON, HEADER_CREDENTIALS, QUERY_CREDENTIALS};
use reqlens::{decode, DecodeResult};

/// Test case definition
struct TestCase {
    input: &'static str,
    description: &'static str,
    expect_app_id: Option<&'static str>,
    expect_agent_tokens: usize,
}

/// Define test cases here
const TEST_CASES: &[TestCase] = &[
    TestCase {
        input: BARE_JSON,
        description: "Bare JSON body with encoded params",
        expect_app_id: None,
        expect_agent_tokens: 0,
    },
    TestCase {
        input: QUERY_CREDENTIALS,
        description: "Transcript with credentials in the query string",
        expect_app_id: Some("OFCNCOG2CU"),
        expect_agent_tokens: 5,
    },
    TestCase {
        input: HEADER_CREDENTIALS,
        description: "Multi-line transcript with credentials in headers",
        expect_app_id: Some("OFCNCOG2CU"),
        expect_agent_tokens: 9,
    },
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Reqlens Decode Examples");
    println!("=======================\n");

    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in TEST_CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);

        match decode(case.input) {
            Ok(result) => {
                let check_result = check_expectations(case, &result);
                print_result_summary(&result);

                if check_result {
                    println!("   ✓ PASS\n");
                    passed += 1;
                } else {
                    println!("   ✗ FAIL (expectations not met)\n");
                    failed += 1;
                }
            }
            Err(e) => {
                println!("   Error: {}", e);
                println!("   ✗ FAIL\n");
                failed += 1;
            }
        }
    }

    println!("=======================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_result_summary(result: &DecodeResult) {
    if let Some(ref app_id) = result.credentials.application_id {
        println!("   Application id: {}", app_id);
    }

    if let Some(ref api_key) = result.credentials.api_key {
        println!("   API key: {}", api_key);
    }

    for token in &result.credentials.client_agent_tokens {
        println!("   Agent: {}", token);
    }

    let payload = result.payload.to_string();
    let preview = payload.chars().take(100).collect::<String>();
    println!(
        "   Payload: {}{}",
        preview,
        if payload.len() > 100 { "..." } else { "" }
    );
}

fn check_expectations(case: &TestCase, result: &DecodeResult) -> bool {
    if result.credentials.application_id.as_deref() != case.expect_app_id {
        println!(
            "   Expected application id '{:?}', got '{:?}'",
            case.expect_app_id, result.credentials.application_id
        );
        return false;
    }

    if result.credentials.client_agent_tokens.len() != case.expect_agent_tokens {
        println!(
            "   Expected {} agent tokens, got {}",
            case.expect_agent_tokens,
            result.credentials.client_agent_tokens.len()
        );
        return false;
    }

    true
}
