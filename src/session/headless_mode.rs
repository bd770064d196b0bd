//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::controller::DashboardController;
use crate::ui::UIConfig;
use std::error::Error;

/// Runs the dashboard controller without a terminal UI
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment.backend_url());

    let mut controller =
        DashboardController::new(session.backend, session.query, UIConfig::new(false));
    controller.state_mut().echo_events();
    controller.start();

    // Event loop: log events to console until Ctrl+C
    loop {
        for event in controller.state_mut().take_new_events() {
            if event.should_display() {
                println!("{}", event);
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = controller.next_update() => {
                if !received {
                    break;
                }
            }
        }
    }

    print_session_shutdown();
    controller.dispose();
    print_session_exit_success();

    Ok(())
}
