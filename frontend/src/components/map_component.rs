use std::{cell::RefCell, rc::Rc};

use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_console::{error, info};
use gloo_timers::future::TimeoutFuture;
use gloo_utils::{document, window};
use keepup_lib::map::{
    initialize, GeolocationError, GeolocationOptions, LatLng, MapError, MapHost, MapInit, MapStatus, DEFAULT_ZOOM,
};
use leaflet::{LatLng as LeafletLatLng, Map, MapOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlScriptElement, Node, Position, PositionError, PositionOptions};
use yew::prelude::*;

use crate::CONFIG;

const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

// PositionError codes
const PERMISSION_DENIED: u16 = 1;
const TIMEOUT: u16 = 3;

fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Leaflet is reached through the global `L`.
fn leaflet_loaded() -> bool {
    js_sys::Reflect::has(&window(), &JsValue::from_str("L")).unwrap_or(false)
}

/// One-shot sender shared by a success and an error callback; whichever fires
/// first wins.
type Reply<T> = Rc<RefCell<Option<oneshot::Sender<T>>>>;

fn reply<T>(slot: &Reply<T>, value: T) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(value);
    }
}

struct LeafletHost {
    container: HtmlElement,
}

#[async_trait(?Send)]
impl MapHost for LeafletHost {
    async fn wait_for_layout(&self, delay_ms: u32) {
        TimeoutFuture::new(delay_ms).await;
    }

    fn container_mounted(&self) -> bool {
        self.container.is_connected()
    }

    fn container_size(&self) -> (f64, f64) {
        (self.container.client_width() as f64, self.container.client_height() as f64)
    }

    async fn load_sdk(&self, _api_key: &str) -> Result<(), String> {
        if leaflet_loaded() {
            return Ok(());
        }

        let document = document();
        let head = document.head().ok_or_else(|| "document has no <head>".to_string())?;

        let stylesheet = document.create_element("link").map_err(js_err)?;
        stylesheet.set_attribute("rel", "stylesheet").map_err(js_err)?;
        stylesheet.set_attribute("href", LEAFLET_CSS).map_err(js_err)?;
        head.append_child(&stylesheet).map_err(js_err)?;

        let script: HtmlScriptElement = document
            .create_element("script")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "created element is not a <script>".to_string())?;
        script.set_src(LEAFLET_JS);

        let (tx, rx) = oneshot::channel::<Result<(), String>>();
        let slot: Reply<Result<(), String>> = Rc::new(RefCell::new(Some(tx)));

        let on_load = {
            let slot = slot.clone();
            Closure::<dyn FnMut()>::new(move || reply(&slot, Ok(())))
        };
        let on_error = {
            let slot = slot.clone();
            Closure::<dyn FnMut()>::new(move || reply(&slot, Err(format!("could not fetch {LEAFLET_JS}"))))
        };
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        head.append_child(&script).map_err(js_err)?;

        let result = rx.await.unwrap_or_else(|_| Err("script loader went away".to_string()));

        script.set_onload(None);
        script.set_onerror(None);
        drop(on_load);
        drop(on_error);

        match result {
            Ok(()) if !leaflet_loaded() => Err("script loaded but did not define L".to_string()),
            other => other,
        }
    }

    async fn locate(&self, options: GeolocationOptions) -> Result<LatLng, GeolocationError> {
        let geolocation = window()
            .navigator()
            .geolocation()
            .map_err(|_| GeolocationError::Unavailable("geolocation not supported".into()))?;

        let (tx, rx) = oneshot::channel::<Result<LatLng, GeolocationError>>();
        let slot: Reply<Result<LatLng, GeolocationError>> = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let slot = slot.clone();
            Closure::<dyn FnMut(Position)>::new(move |position: Position| {
                let coords = position.coords();
                reply(&slot, Ok(LatLng { lat: coords.latitude(), lng: coords.longitude() }));
            })
        };
        let on_error = {
            let slot = slot.clone();
            Closure::<dyn FnMut(PositionError)>::new(move |err: PositionError| {
                let err = match err.code() {
                    PERMISSION_DENIED => GeolocationError::Denied,
                    TIMEOUT => GeolocationError::Timeout,
                    _ => GeolocationError::Unavailable(err.message()),
                };
                reply(&slot, Err(err));
            })
        };

        let position_options = PositionOptions::new();
        position_options.set_enable_high_accuracy(options.high_accuracy);
        position_options.set_timeout(options.timeout_ms);
        position_options.set_maximum_age(options.maximum_age_ms);

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options,
            )
            .map_err(|err| GeolocationError::Unavailable(js_err(err)))?;

        // The browser enforces the timeout, so this always resolves
        let result = rx
            .await
            .unwrap_or_else(|_| Err(GeolocationError::Unavailable("callback dropped".into())));

        drop(on_success);
        drop(on_error);
        result
    }
}

pub enum MapMsg {
    Initialized(MapInit),
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    #[prop_or_default]
    pub class: Classes,
}

pub struct MapComponent {
    container: Option<HtmlElement>,
    status: MapStatus,
    map: Option<Map>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        match &self.container {
            Some(container) => {
                let node: &Node = container.as_ref();
                Html::VRef(node.clone())
            }
            None => html! {},
        }
    }

    fn render_overlay(&self) -> Html {
        match &self.status {
            MapStatus::Ready { .. } => html! {},
            MapStatus::Loading => html! {
                <div class="map-overlay">
                    <div class="spinner"></div>
                    <p>{"Loading map..."}</p>
                </div>
            },
            MapStatus::Failed(MapError::MissingCredential) => html! {
                <div class="map-overlay">
                    <div class="warning-icon">{"⚠️"}</div>
                    <p class="error-text">{"Missing map API key"}</p>
                </div>
            },
            MapStatus::Failed(err) => html! {
                <div class="map-overlay">
                    <div class="warning-icon">{"⚠️"}</div>
                    <p class="error-text">{format!("Error occurred: {err}")}</p>
                </div>
            },
        }
    }

    fn show_map(&mut self, center: LatLng) {
        let Some(container) = &self.container else {
            return;
        };

        let map = Map::new_with_element(container, &MapOptions::default());
        map.set_view(&LeafletLatLng::new(center.lat, center.lng), DEFAULT_ZOOM);
        if let Some(key) = &CONFIG.map_api_key {
            add_tile_layer(&map, key);
        }
        self.map = Some(map);
    }
}

impl Component for MapComponent {
    type Message = MapMsg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        let mut status = MapStatus::initial(CONFIG.map_api_key.as_deref());

        let container = document()
            .create_element("div")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        match &container {
            Some(container) => container.set_class_name("map-canvas"),
            None => {
                error!("Could not create map container");
                if status == MapStatus::Loading {
                    status = MapStatus::Failed(MapError::ContainerNotMounted);
                }
            }
        }

        Self {
            container,
            status,
            map: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.status != MapStatus::Loading {
            return;
        }
        let Some(container) = self.container.clone() else {
            return;
        };

        let cb = ctx.link().callback(MapMsg::Initialized);
        spawn_local(async move {
            let host = LeafletHost { container };
            cb.emit(initialize(CONFIG.map_api_key.as_deref(), &host).await);
        });
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MapMsg::Initialized(init) => {
                if let Some(err) = &init.location_error {
                    info!(format!("Unable to get current position, using default center: {err}"));
                }
                match &init.status {
                    MapStatus::Ready { center, located } => {
                        info!(format!("Map ready at {}, {} (located: {located})", center.lat, center.lng));
                        self.show_map(*center);
                    }
                    MapStatus::Failed(err) => error!(format!("Map failed: {err}")),
                    MapStatus::Loading => {}
                }
                self.status = init.status;
            }
        }
        true
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        if let Some(map) = &self.map {
            map.invalidate_size(false);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class={classes!("map-widget", ctx.props().class.clone())}>
                {self.render_map()}
                {self.render_overlay()}
            </div>
        }
    }
}

fn add_tile_layer(map: &Map, key: &str) {
    let url = format!("https://api.maptiler.com/maps/basic-v2/256/{{z}}/{{x}}/{{y}}.png?key={}", key);
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    TileLayer::new_options(&url, &opts).add_to(map);
}
