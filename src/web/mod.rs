//! # 浏览器入口
//!
//! 仅在 `web` feature 且目标为 wasm32 时编译。宿主页面的用法：
//! ```html
//! <select id="selectMenu"><option>Select an Employee</option></select>
//! <main></main>
//! <script type="module">
//!   import init, { init_app } from "./pkg/post_reader.js";
//!   await init();
//!   init_app(null); // 或传入 JSON 配置字符串
//! </script>
//! ```
//!
//! `init_app` 定位页面锚点、拉取用户填充选择器，并为选择器绑定 change 事件。
//! 任何失败都只记录日志并返回 `false`，不向 JS 抛出异常。

mod browser_dom;

pub use browser_dom::{BrowserDom, BrowserListener};

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::config::ViewerConfig;
use crate::services::api::{ApiClient, ReqwestTransport};
use crate::services::renderer::{PageAnchors, PostBoard};

type BrowserBoard = PostBoard<BrowserDom, ReqwestTransport>;

/// wasm 模块加载时执行：安装 panic 钩子和控制台日志
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // 重复初始化（模块被多次实例化）时 logger 已存在，忽略即可
    let _ = console_log::init_with_level(log::Level::Info);
}

/// 启动页面
///
/// # 参数
/// - `config_json` - 可选的 JSON 配置（字段见 `ViewerConfig`），`null` 使用默认配置
///
/// # 返回值
/// 成功定位锚点并开始加载时返回 `true`
#[wasm_bindgen]
pub fn init_app(config_json: Option<String>) -> bool {
    match try_init_app(config_json.as_deref().unwrap_or("")) {
        Ok(()) => true,
        Err(e) => {
            log::error!("页面启动失败: {}", e);
            false
        }
    }
}

fn try_init_app(config_json: &str) -> Result<(), String> {
    let config = ViewerConfig::from_json(config_json)?;
    let dom = BrowserDom::from_window()?;
    let anchors = PageAnchors::locate(&dom, &config)
        .ok_or_else(|| "页面缺少 <main> 或用户选择器".to_string())?;
    let selector = anchors.selector.clone();

    let api = ApiClient::new(ReqwestTransport::new(), &config.api_base_url);
    let board: Rc<BrowserBoard> = Rc::new(PostBoard::new(api, config, anchors));
    let dom = Rc::new(RefCell::new(dom));

    bind_selection_change(&selector, Rc::clone(&board), Rc::clone(&dom))?;

    wasm_bindgen_futures::spawn_local(async move {
        board.init_page(&dom).await;
    });
    Ok(())
}

/// 为选择器绑定 change 事件
///
/// 选择器在页面生命周期内只绑定一次，闭包交给 JS 持有（`forget`）。
fn bind_selection_change(
    selector: &web_sys::Node,
    board: Rc<BrowserBoard>,
    dom: Rc<RefCell<BrowserDom>>,
) -> Result<(), String> {
    let on_change = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let value = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlSelectElement>().ok())
            .map(|select| select.value());
        let board = Rc::clone(&board);
        let dom = Rc::clone(&dom);
        wasm_bindgen_futures::spawn_local(async move {
            board.select_user(&dom, value.as_deref()).await;
        });
    }) as Box<dyn FnMut(web_sys::Event)>);

    selector
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|_| "selector: addEventListener(change) failed".to_string())?;
    on_change.forget();
    Ok(())
}
