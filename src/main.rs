#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the whiteboard application; file dialogs are spawned onto the
    // surrounding tokio runtime.
    whiteboard_tool::run_app()
}
