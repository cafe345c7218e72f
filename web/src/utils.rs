use wasm_bindgen::{JsCast, JsValue};

/// Name under which a value lives in the browser's local storage.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Fires two confetti bursts from the bottom corners when the page ships a global `confetti` function.
pub(crate) fn launch_confetti() {
    use js_sys::{Function, Object, Reflect};

    let Ok(confetti) = Reflect::get(&js_sys::global(), &JsValue::from_str("confetti")) else {
        return;
    };
    let Some(confetti) = confetti.dyn_ref::<Function>() else {
        log::debug!("no confetti on this page");
        return;
    };

    for (angle, x) in [(60.0_f64, 0.0_f64), (120.0, 1.0)] {
        let origin = Object::new();
        let options = Object::new();
        let fields: [(&Object, &str, JsValue); 5] = [
            (&origin, "x", x.into()),
            (&origin, "y", 0.6_f64.into()),
            (&options, "particleCount", 80_i32.into()),
            (&options, "angle", angle.into()),
            (&options, "spread", 70_i32.into()),
        ];
        for (target, key, value) in fields {
            if let Err(err) = Reflect::set(target, &JsValue::from_str(key), &value) {
                log::warn!("failed to build confetti options: {:?}", err);
                return;
            }
        }
        if let Err(err) = Reflect::set(&options, &JsValue::from_str("origin"), &origin) {
            log::warn!("failed to build confetti options: {:?}", err);
            return;
        }

        if let Err(err) = confetti.call1(&JsValue::NULL, &options) {
            log::warn!("confetti failed: {:?}", err);
        }
    }
}
