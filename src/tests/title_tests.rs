use crate::session::parser::UNTITLED;
use crate::session::{resolve_title, sanitize_title, MessageFragment, Role};

fn message(role: Role, text: &str) -> MessageFragment {
    MessageFragment {
        role,
        text: text.to_string(),
        file_references: Vec::new(),
        code_blocks: Vec::new(),
    }
}

#[test]
fn test_stored_name_used_trimmed() {
    let messages = [message(Role::User, "ignored")];
    assert_eq!(resolve_title(Some("  My session  "), &messages, 25), "My session");
}

#[test]
fn test_placeholder_name_falls_back_to_message() {
    let messages = [message(Role::User, "Explain lifetimes")];
    assert_eq!(resolve_title(Some("UnTitled"), &messages, 25), "Explain lifetimes");
    assert_eq!(resolve_title(Some("   "), &messages, 25), "Explain lifetimes");
    assert_eq!(resolve_title(None, &messages, 25), "Explain lifetimes");
}

#[test]
fn test_fallback_uses_first_line_of_first_message_with_text() {
    let messages = [
        message(Role::User, "  "),
        message(Role::Assistant, "\nFix the bug\nin parser"),
        message(Role::User, "later"),
    ];
    assert_eq!(resolve_title(None, &messages, 25), "Fix the bug");
}

#[test]
fn test_fallback_truncated_to_limit() {
    let messages = [message(Role::User, "abcdefghijklmnopqrstuvwxyz0123456789")];
    assert_eq!(resolve_title(None, &messages, 25), "abcdefghijklmnopqrstuvwxy");
    assert_eq!(
        resolve_title(None, &messages, 50),
        "abcdefghijklmnopqrstuvwxyz0123456789"
    );
}

#[test]
fn test_truncation_respects_char_boundaries() {
    let messages = [message(Role::User, "修复解析器中的错误并添加测试")];
    assert_eq!(resolve_title(None, &messages, 5), "修复解析器");
}

#[test]
fn test_no_text_gives_untitled() {
    assert_eq!(resolve_title(None, &[], 25), UNTITLED);
    let blank = [message(Role::User, " \n ")];
    assert_eq!(resolve_title(Some("untitled"), &blank, 25), UNTITLED);
}

#[test]
fn test_sanitize_replaces_unsafe_characters() {
    assert_eq!(
        sanitize_title("a<b>c:d\"e/f\\g|h?i*j"),
        "a_b_c_d_e_f_g_h_i_j"
    );
    assert_eq!(sanitize_title("line\r\nbreak"), "line__break");
}

#[test]
fn test_sanitize_truncates_long_titles() {
    let long = "x".repeat(41);
    let sanitized = sanitize_title(&long);
    assert_eq!(sanitized, format!("{}...", "x".repeat(37)));
    assert_eq!(sanitized.chars().count(), 40);

    let exactly_forty = "y".repeat(40);
    assert_eq!(sanitize_title(&exactly_forty), exactly_forty);
}

#[test]
fn test_sanitize_is_a_fixed_point() {
    let inputs = [
        "plain".to_string(),
        "what/is:this?".to_string(),
        "z".repeat(100),
        "多字节标题".repeat(12),
        "ends with dots...".to_string(),
    ];
    for input in &inputs {
        let once = sanitize_title(input);
        assert_eq!(sanitize_title(&once), once, "not a fixed point for {:?}", input);
    }
}
