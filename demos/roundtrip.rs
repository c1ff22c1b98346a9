use jsonb_rs::{decode, encode, Document, Value};
use serde_json::json;

fn main() {
    println!("=== JSON <-> Binary Round-Trip Examples ===\n");

    // Example 1: Single float field
    example_1();

    // Example 2: Integer packing
    example_2();

    // Example 3: Complex real-world data
    example_3();
}

fn example_1() {
    println!("Example 1: Single Float Field");
    println!("=============================");

    let doc = Document::load_from_json(r#"{"key" : 0.123}"#).unwrap();
    println!("binary size: {}", doc.binary_size());

    let reloaded = Document::load_from_binary(doc.to_binary()).unwrap();
    println!("json string: {}\n", reloaded.to_json().unwrap());
}

fn example_2() {
    println!("Example 2: Integer Packing");
    println!("==========================");

    for i in [5i64, 200, -200, 300, 40000, 3000000000, 1 << 40] {
        let bytes = encode(&Value::Integer(i));
        println!("{:>14} -> tag {:>2}, {} bytes", i, bytes[0], bytes.len());
    }
    println!();
}

fn example_3() {
    println!("Example 3: Complex Real-World Data");
    println!("===================================");

    let json = json!({
        "api_version": "v2",
        "server": {
            "host": "api.example.com",
            "port": 8080,
            "ssl": true
        },
        "endpoints": [
            {"method": "GET", "path": "/users", "auth": true},
            {"method": "POST", "path": "/users", "auth": true},
            {"method": "GET", "path": "/health", "auth": false}
        ],
        "database": {
            "type": "postgres",
            "connection": {
                "host": "db.example.com",
                "port": 5432,
                "database": "myapp"
            }
        },
        "features": ["auth", "cache", "metrics"],
        "limits": {
            "max_connections": 100,
            "timeout": 30,
            "rate_limit": 1000
        }
    });

    let text = serde_json::to_string(&json).unwrap();
    let value = Value::from(json);
    let bytes = encode(&value);
    println!("JSON text: {} bytes", text.len());
    println!("Binary:    {} bytes\n", bytes.len());

    let decoded = decode(&bytes).unwrap();

    assert_eq!(value, decoded, "Round-trip failed!");
    println!("Round-trip successful!");
    println!("\nAll examples completed successfully!");
}
