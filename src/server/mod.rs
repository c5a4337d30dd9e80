use crate::command::db;
use crate::conf::Conf;
use crate::rest::v1;
use crate::{error, Result};
use actix_web::dev::Service;
use actix_web::web::{scope, Data, QueryConfig};
use actix_web::{
    middleware::{Compress, NormalizePath},
    App, HttpServer,
};
use futures_util::future::FutureExt;
use time::OffsetDateTime;
use tracing::info;

pub async fn run(conf: Conf) -> Result<()> {
    // All the worker threads are sharing a single connection pool
    let pool = db::pool()?;
    let http_addr = conf.http_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let req_query_string = req.query_string().to_string();
                let req_method = req.method().as_str().to_string();
                let req_path = req.path().to_string();
                let req_version = format!("{:?}", req.version());
                let req_time = OffsetDateTime::now_utc();
                let req_ip = req
                    .connection_info()
                    .peer_addr()
                    .unwrap_or_default()
                    .to_string();
                srv.call(req).map(move |res| {
                    if let Ok(res) = res.as_ref() {
                        let res_status = res.status().as_u16();
                        let res_time_sec = (OffsetDateTime::now_utc() - req_time).as_seconds_f64();
                        info!(
                            req_query_string,
                            req_method,
                            req_path,
                            req_version,
                            req_ip,
                            res_status,
                            res_time_sec,
                        );
                    }
                    res
                })
            })
            .wrap(NormalizePath::trim())
            .wrap(Compress::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(conf.clone()))
            .app_data(QueryConfig::default().error_handler(error::query_error_handler))
            .service(
                scope("v1")
                    .service(
                        scope("projects")
                            .service(v1::projects::get)
                            .service(v1::projects::post)
                            .service(v1::projects::get_by_id)
                            .service(v1::projects::patch_by_id)
                            .service(v1::projects::delete_by_id)
                            .service(v1::legal_info::get_by_project)
                            .service(v1::legal_info::post_by_project)
                            .service(v1::building_calculations::post_compute)
                            .service(v1::building_calculations::post_history)
                            .service(v1::building_calculations::get_history)
                            .service(v1::kokuji::get_by_project)
                            .service(v1::kokuji::post_by_project)
                            .service(v1::kokuji::delete_by_project),
                    )
                    .service(
                        scope("kokuji")
                            .service(v1::kokuji::get)
                            .service(v1::kokuji::get_by_id),
                    )
                    .service(scope("landuse").service(v1::landuse::get))
                    .service(scope("address").service(v1::landuse::search)),
            )
    })
    .bind(http_addr)?
    .run()
    .await?;

    Ok(())
}
