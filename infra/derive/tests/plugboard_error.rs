#[test]
fn plugboard_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/plugboard_error_pass.rs");
    t.pass("tests/ui/plugboard_error_unit_variants.rs");
}
