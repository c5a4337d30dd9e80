use crate::conf::Conf;
use crate::geo::GeoPoint;
use crate::service;
use crate::service::landuse::LanduseInfo;
use crate::Result;
use actix_web::web::{Data, Json, Query};
use actix_web::{get, post};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GetArgs {
    lat: f64,
    lng: f64,
}

#[get("")]
pub async fn get(args: Query<GetArgs>, conf: Data<Conf>) -> Result<Json<LanduseInfo>> {
    let point = GeoPoint::new(args.lat, args.lng)?;
    service::landuse::query_point(&point, &conf).await.map(Json)
}

#[derive(Deserialize)]
pub struct SearchArgs {
    word: String,
}

#[derive(Serialize, Deserialize)]
pub struct SearchItem {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

#[post("search")]
pub async fn search(args: Json<SearchArgs>, conf: Data<Conf>) -> Result<Json<SearchItem>> {
    let hit = service::geocoding::search_address(&args.word, &conf).await?;
    Ok(Json(SearchItem {
        lat: hit.point.lat(),
        lng: hit.point.lng(),
        address: hit.address,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::mock_conf;
    use crate::{ApiError, Result};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::web::scope;
    use actix_web::{test, App};

    #[test]
    async fn out_of_range_latitude_is_rejected() -> Result<()> {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(mock_conf()))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/?lat=91&lng=139.7").to_request();
        let res: ApiError = test::try_call_and_read_body_json(&app, req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST.as_u16(), res.http_code);
        Ok(())
    }

    #[test]
    async fn missing_coordinates_are_rejected() -> Result<()> {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(mock_conf()))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/?lat=35.6").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
