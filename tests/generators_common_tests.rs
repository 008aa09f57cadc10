use contract_doc_server::contract::common::{current_contract_date, sanitize_subject_name};

#[test]
fn test_sanitize_subject_name() {
    assert_eq!(sanitize_subject_name("Maria Santos"), "Maria_Santos");
    assert_eq!(sanitize_subject_name("  Jane   Doe  "), "Jane_Doe");
    assert_eq!(sanitize_subject_name("O'Brien, Jr."), "OBrien_Jr");
    assert_eq!(sanitize_subject_name("dela-Cruz_01"), "dela-Cruz_01");
}

#[test]
fn test_sanitize_falls_back_to_employee() {
    assert_eq!(sanitize_subject_name(""), "Employee");
    assert_eq!(sanitize_subject_name("####"), "Employee");
    assert_eq!(sanitize_subject_name("   "), "Employee");
}

#[test]
fn test_sanitize_is_idempotent() {
    for input in ["Maria Santos", "  a  b  ", "####", "", "José García", "a#b c"] {
        let once = sanitize_subject_name(input);
        assert_eq!(sanitize_subject_name(&once), once);
    }
}

#[test]
fn test_current_contract_date_format() {
    let date = current_contract_date();
    assert_eq!(date.len(), 10);
    let bytes = date.as_bytes();
    assert_eq!(bytes[4], b'-');
    assert_eq!(bytes[7], b'-');
    assert!(date[..4].chars().all(|c| c.is_ascii_digit()));
}
