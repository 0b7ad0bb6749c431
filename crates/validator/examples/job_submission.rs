//! Validating a print job submission.
//!
//! Run with: `cargo run -p printdesk-validator --example job_submission`

use printdesk_validator::prelude::*;

fn main() {
    let schema = Schema::new()
        .field("student_name", [required(), max_length(60)])
        .field("student_email", [required(), email()])
        .field("copies", [required(), number(), min(1), max(10)])
        .field(
            "model",
            [required(), file_type(["model/stl", "model/obj", "model/3mf"]), file_size(50)],
        );

    let data = FormData::new()
        .with("student_name", "Ann Lee")
        .with("student_email", "ann@university")
        .with("copies", "12")
        .with("model", FileInfo::new("bracket.stl", "model/stl", 4 * 1024 * 1024));

    let mut form = ValidationManager::new();
    if form.validate_form(&data, &schema) {
        println!("Submission accepted");
        return;
    }

    println!("Submission rejected:");
    for (field, message) in form.errors() {
        println!("  {field}: {message}");
    }
}
