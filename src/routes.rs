use crate::{
    api::{attendance, holiday, roster},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));
    let workmode_limiter = Arc::new(build_limiter(config.rate_workmode_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance/work-mode/on
                    .service(
                        web::resource("/work-mode/on")
                            .wrap(workmode_limiter.clone())
                            .route(web::post().to(attendance::work_mode_on)),
                    )
                    // /attendance/work-mode/off
                    .service(
                        web::resource("/work-mode/off")
                            .wrap(workmode_limiter.clone())
                            .route(web::post().to(attendance::work_mode_off)),
                    )
                    // /attendance/travel
                    .service(
                        web::resource("/travel").route(web::post().to(attendance::travel_sample)),
                    )
                    // /attendance/today
                    .service(
                        web::resource("/today").route(web::get().to(attendance::today_status)),
                    )
                    // /attendance/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .route(web::put().to(attendance::set_status)),
                    ),
            )
            .service(
                web::scope("/roster")
                    // /roster
                    .service(web::resource("").route(web::get().to(roster::daily_roster)))
                    // /roster/summary
                    .service(
                        web::resource("/summary").route(web::get().to(roster::roster_summary)),
                    ),
            )
            .service(
                web::scope("/holiday")
                    // /holiday
                    .service(
                        web::resource("")
                            .route(web::post().to(holiday::create_holiday))
                            .route(web::get().to(holiday::list_holidays)),
                    ),
            ),
    );
}
