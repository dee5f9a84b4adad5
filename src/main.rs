fn main() -> std::process::ExitCode {
    cursor_chat_export_lib::run()
}
