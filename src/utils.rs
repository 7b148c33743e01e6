pub fn setup_hooks() {
    #[cfg(debug_assertions)]
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
    }
}


/// Whether the host page carries the backdrop surface. A missing element is
/// an expected state, not an error: the caller degrades to no backdrop.
#[cfg(target_arch = "wasm32")]
pub fn surface_present(selector: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(selector).ok().flatten())
        .is_some()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn surface_present(_selector: &str) -> bool {
    true
}
