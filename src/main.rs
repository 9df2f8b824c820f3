use busroute::config::Config;
use busroute::engine::{Notice, RouteRenderingEngine};
use busroute::entities::Variant;
use busroute::error::{geolocation_unavailable_error, Error};
use busroute::external::{GoogleDirections, RoutesClient};
use busroute::map::MemorySurface;
use busroute::view::RouteView;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let routes = RoutesClient::new(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();

    let (school_id, route_id) = match args.as_slice() {
        [school_id, route_id, ..] => (school_id, route_id),
        [school_id] => {
            for school in routes.fetch_schools().await? {
                if &school.school_id == school_id {
                    for route in school.routes {
                        println!("{}\t{}", route.route_id, route.description);
                    }
                }
            }
            return Ok(());
        }
        [] => {
            for school in routes.fetch_schools().await? {
                println!("{}\t{}", school.school_id, school.description);
            }
            return Ok(());
        }
    };

    let engine = RouteRenderingEngine::new(GoogleDirections::new(&config), MemorySurface::new())
        .with_timeout(config.directions_timeout);
    let notices = engine.notices();
    let view = RouteView::new(engine, config.default_center);

    // no rider location when running headless
    view.center(Err(geolocation_unavailable_error())).await;

    view.load_route(routes.fetch_route(school_id, route_id).await?)
        .await;

    for variant in [Variant::PickUp, Variant::DropOff] {
        view.select_variant(variant).await;

        if let Some(handle) = view.step().await {
            match handle.await {
                Ok(Ok(outcome)) => tracing::info!(?outcome, "{}", variant.label()),
                Ok(Err(err)) => tracing::warn!("{}: {}", variant.label(), err),
                Err(err) => tracing::error!("render task failed: {}", err),
            }
        }

        for index in 0..view.engine().marker_count().await {
            view.engine().open_marker(index).await;
            let popup = view
                .engine()
                .with_surface(|surface| surface.open_popup_content().map(String::from))
                .await;

            if let Some(popup) = popup {
                println!("{}\t{}", index + 1, popup.replace("<br>", " - "));
            }
        }
    }

    while let Ok(Notice::DirectionsFailed { variant, reason }) = notices.try_recv() {
        eprintln!("{}: {}", variant.label(), reason);
    }

    view.close().await;

    Ok(())
}
