pub mod ai;
pub mod commands;
pub mod export;
pub mod models;
pub mod parser;
pub mod workspace;

use workspace::WorkspaceState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_clipboard_manager::init())
        .manage(WorkspaceState::new())
        .invoke_handler(tauri::generate_handler![
            commands::parse_scene_json,
            commands::clear_workspace,
            commands::toggle_field,
            commands::field_summaries,
            commands::format_field,
            commands::export_field,
            commands::export_selected,
            commands::generate_ai_response,
            commands::suggested_prompts,
            commands::set_api_key,
            commands::delete_api_key,
            commands::check_api_key,
            commands::copy_to_clipboard,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
