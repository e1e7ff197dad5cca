use crate::dashboard::{snapshot, DashboardQuery, DashboardState, SharedDashboard};
use crate::errors::ServerError;
use crate::responses::{html_response, html_response_with_status, json_response, ResultResp};
use crate::templates::pages::{dashboard_page, load_error_page, loading_page};
use astra::Request;

pub fn handle(req: Request, dashboard: &SharedDashboard) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    tracing::debug!("{method} {path}");

    match (method, path) {
        ("GET", "/") => match snapshot(dashboard)? {
            DashboardState::Loading => html_response_with_status(503, loading_page()),
            DashboardState::Error(msg) => html_response_with_status(503, load_error_page(&msg)),
            DashboardState::Ready(app) => {
                let query = DashboardQuery::parse(req.uri().query(), &app.data.sub_areas)?;
                html_response(dashboard_page(&app.apply(query)))
            }
        },

        ("GET", "/classified.json") => match snapshot(dashboard)? {
            DashboardState::Ready(app) => json_response(&app.data.records),
            DashboardState::Loading => Err(ServerError::Load("data is still loading".into())),
            DashboardState::Error(msg) => Err(ServerError::Load(msg)),
        },

        _ => Err(ServerError::NotFound),
    }
}
