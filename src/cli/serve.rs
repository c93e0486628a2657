use crate::{config::Config, error, info, server, warning};

pub async fn serve(config: Config, open: bool) {
    let login_url = format!("http://{}/login", config.server_addr);

    let (listener, app) = match server::bind_api_server(config).await {
        Ok(bound) => bound,
        Err(e) => error!("Cannot start server. Err: {}", e),
    };

    if open {
        if webbrowser::open(&login_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                login_url
            );
        } else {
            info!("Opened {} in the browser", login_url);
        }
    }

    if let Err(e) = server::run_api_server(listener, app).await {
        error!("Server stopped. Err: {}", e);
    }
}
