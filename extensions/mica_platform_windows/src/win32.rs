//! Win32 implementation of the platform contracts

use std::ffi::c_void;
use std::mem::size_of;

use mica_core::Color;
use mica_platform::{
    ColorScheme, Compositor, MaterialType, NativeHandle, PlatformError, Result, SystemAppearance,
};
use raw_window_handle::RawWindowHandle;
use rustc_hash::FxHashMap;
use windows::core::{s, w, PCWSTR};
use windows::Win32::Foundation::{BOOL, ERROR_SUCCESS, HWND, LPARAM};
use windows::Win32::Graphics::Dwm::{
    DwmGetColorizationColor, DwmSetWindowAttribute, DWMSBT_MAINWINDOW, DWMSBT_NONE,
    DWMSBT_TABBEDWINDOW, DWMWA_SYSTEMBACKDROP_TYPE, DWMWA_USE_IMMERSIVE_DARK_MODE,
    DWM_SYSTEMBACKDROP_TYPE,
};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::Win32::System::Registry::{
    RegGetValueW, HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD, RRF_RT_REG_SZ,
};
use windows::Win32::UI::WindowsAndMessaging::WM_SETTINGCHANGE;

use crate::accent::{self, AccentState, WCA_ACCENT_POLICY};

#[repr(C)]
struct AccentPolicy {
    accent_state: u32,
    accent_flags: u32,
    gradient_color: u32,
    animation_id: u32,
}

#[repr(C)]
struct WindowCompositionAttribData {
    attribute: u32,
    data: *mut c_void,
    size_of_data: usize,
}

type SetWindowCompositionAttributeFn =
    unsafe extern "system" fn(HWND, *mut WindowCompositionAttribData) -> BOOL;

const PERSONALIZE_KEY: PCWSTR =
    w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");
const CURRENT_VERSION_KEY: PCWSTR = w!("SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion");

/// Compositor and appearance provider backed by DWM and user32
pub struct WindowsPlatform {
    build: u32,
    set_composition: Option<SetWindowCompositionAttributeFn>,
    acrylic_tint: Color,
    registered: FxHashMap<isize, MaterialType>,
    subscribed: bool,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        let build = os_build().unwrap_or(0);
        let set_composition = load_set_window_composition_attribute();
        if set_composition.is_none() {
            tracing::warn!("SetWindowCompositionAttribute unavailable, blur and acrylic disabled");
        }
        tracing::debug!(build, "windows platform initialized");
        Self {
            build,
            set_composition,
            acrylic_tint: Color::from_rgba8(255, 255, 255, 200),
            registered: FxHashMap::default(),
            subscribed: false,
        }
    }

    /// OS build number, 0 when unknown
    pub fn build(&self) -> u32 {
        self.build
    }

    /// Tint the compositor applies to native acrylic
    pub fn set_acrylic_tint(&mut self, tint: Color) {
        self.acrylic_tint = tint;
    }

    /// Material currently registered for `handle`
    pub fn material(&self, handle: NativeHandle) -> Option<MaterialType> {
        hwnd_of(handle).ok().and_then(|hwnd| self.registered.get(&(hwnd.0 as isize)).copied())
    }

    /// Whether a window message announces a scheme change. Hosts forward
    /// `WM_SETTINGCHANGE` here and call `ThemeRegistry::poll_system_scheme`
    /// when it returns `true`.
    pub fn is_scheme_change(&self, message: u32, lparam: LPARAM) -> bool {
        if !self.subscribed || message != WM_SETTINGCHANGE || lparam.0 == 0 {
            return false;
        }
        // SAFETY: for WM_SETTINGCHANGE a non-null lParam points to a
        // NUL-terminated UTF-16 string owned by the sender.
        let area = unsafe { PCWSTR(lparam.0 as *const u16).to_string() };
        area.map(|s| s == "ImmersiveColorSet").unwrap_or(false)
    }

    fn set_accent(&self, hwnd: HWND, state: AccentState, tint: Color) -> Result<()> {
        let set_composition = self
            .set_composition
            .ok_or_else(|| PlatformError::Unavailable("SetWindowCompositionAttribute".into()))?;

        let mut policy = AccentPolicy {
            accent_state: state as u32,
            accent_flags: 0,
            gradient_color: accent::gradient_color(tint),
            animation_id: 0,
        };
        let mut data = WindowCompositionAttribData {
            attribute: WCA_ACCENT_POLICY,
            data: &mut policy as *mut AccentPolicy as *mut c_void,
            size_of_data: size_of::<AccentPolicy>(),
        };

        // SAFETY: both structs outlive the call and match the layout user32 expects.
        let ok = unsafe { set_composition(hwnd, &mut data) };
        if ok.as_bool() {
            Ok(())
        } else {
            Err(PlatformError::NativeCall {
                call: "SetWindowCompositionAttribute",
                message: format!("accent state {state:?} refused"),
            })
        }
    }

    fn set_system_backdrop(&self, hwnd: HWND, material: MaterialType) -> Result<()> {
        let backdrop: DWM_SYSTEMBACKDROP_TYPE = match material {
            MaterialType::Mica => DWMSBT_MAINWINDOW,
            MaterialType::MicaAlt => DWMSBT_TABBEDWINDOW,
            _ => DWMSBT_NONE,
        };
        let dark = BOOL::from(self.color_scheme() == Some(ColorScheme::Dark));

        // SAFETY: the attribute values are plain integers passed by pointer
        // with their exact size.
        unsafe {
            // Dark frames are cosmetic; the backdrop call decides success
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWA_USE_IMMERSIVE_DARK_MODE,
                &dark as *const BOOL as *const c_void,
                size_of::<BOOL>() as u32,
            );
            DwmSetWindowAttribute(
                hwnd,
                DWMWA_SYSTEMBACKDROP_TYPE,
                &backdrop as *const DWM_SYSTEMBACKDROP_TYPE as *const c_void,
                size_of::<DWM_SYSTEMBACKDROP_TYPE>() as u32,
            )
        }
        .map_err(|err| PlatformError::NativeCall {
            call: "DwmSetWindowAttribute",
            message: err.message(),
        })
    }

    fn apply(&self, hwnd: HWND, material: MaterialType) -> Result<()> {
        if material.is_mica() {
            return self.set_system_backdrop(hwnd, material);
        }
        match AccentState::for_material(material) {
            Some(state) => self.set_accent(hwnd, state, self.acrylic_tint),
            None => Err(PlatformError::UnsupportedMaterial(material.to_string())),
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor for WindowsPlatform {
    fn supports(&self, material: MaterialType) -> bool {
        if !accent::supported_on(material, self.build) {
            return false;
        }
        material.is_mica() || material == MaterialType::None || self.set_composition.is_some()
    }

    fn register_backdrop(&mut self, handle: NativeHandle, material: MaterialType) -> bool {
        if !self.supports(material) {
            tracing::debug!(%material, build = self.build, "backdrop not supported");
            return false;
        }
        let result = hwnd_of(handle).and_then(|hwnd| {
            self.apply(hwnd, material)?;
            Ok(hwnd)
        });
        match result {
            Ok(hwnd) => {
                self.registered.insert(hwnd.0 as isize, material);
                tracing::debug!(%material, "native backdrop registered");
                true
            }
            Err(err) => {
                tracing::warn!(%material, %err, "native backdrop refused");
                false
            }
        }
    }

    fn unregister_backdrop(&mut self, handle: NativeHandle) -> bool {
        let Ok(hwnd) = hwnd_of(handle) else {
            return false;
        };
        let Some(material) = self.registered.remove(&(hwnd.0 as isize)) else {
            return false;
        };
        let result = if material.is_mica() {
            self.set_system_backdrop(hwnd, MaterialType::None)
        } else {
            self.set_accent(hwnd, AccentState::Disabled, Color::TRANSPARENT)
        };
        if let Err(err) = &result {
            tracing::warn!(%material, %err, "failed to clear native backdrop");
        }
        result.is_ok()
    }
}

impl SystemAppearance for WindowsPlatform {
    fn color_scheme(&self) -> Option<ColorScheme> {
        let light = read_dword(HKEY_CURRENT_USER, PERSONALIZE_KEY, w!("AppsUseLightTheme"))?;
        Some(if light == 0 {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        })
    }

    fn accent_color(&self) -> Option<Color> {
        let mut value = 0u32;
        let mut opaque = BOOL::default();
        // SAFETY: both out-pointers are valid for the duration of the call.
        unsafe { DwmGetColorizationColor(&mut value, &mut opaque) }.ok()?;
        Some(accent::colorization_to_color(value))
    }

    fn subscribe(&mut self) -> bool {
        self.subscribed = true;
        true
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

fn hwnd_of(handle: NativeHandle) -> Result<HWND> {
    match handle {
        RawWindowHandle::Win32(h) => Ok(HWND(h.hwnd.get() as *mut c_void)),
        other => Err(PlatformError::UnsupportedHandle(format!("{other:?}"))),
    }
}

fn load_set_window_composition_attribute() -> Option<SetWindowCompositionAttributeFn> {
    // SAFETY: user32 stays loaded for the life of any GUI process, and the
    // exported symbol has the signature declared above.
    unsafe {
        let user32 = GetModuleHandleW(w!("user32.dll")).ok()?;
        let proc = GetProcAddress(user32, s!("SetWindowCompositionAttribute"))?;
        Some(std::mem::transmute::<
            unsafe extern "system" fn() -> isize,
            SetWindowCompositionAttributeFn,
        >(proc))
    }
}

fn read_dword(key: HKEY, subkey: PCWSTR, value: PCWSTR) -> Option<u32> {
    let mut data = 0u32;
    let mut size = size_of::<u32>() as u32;
    // SAFETY: `data` and `size` are valid for writes of a DWORD.
    let status = unsafe {
        RegGetValueW(
            key,
            subkey,
            value,
            RRF_RT_REG_DWORD,
            None,
            Some(&mut data as *mut u32 as *mut c_void),
            Some(&mut size),
        )
    };
    (status == ERROR_SUCCESS).then_some(data)
}

fn os_build() -> Option<u32> {
    let mut buf = [0u16; 32];
    let mut size = std::mem::size_of_val(&buf) as u32;
    // SAFETY: `buf` is valid for `size` bytes.
    let status = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            CURRENT_VERSION_KEY,
            w!("CurrentBuildNumber"),
            RRF_RT_REG_SZ,
            None,
            Some(buf.as_mut_ptr() as *mut c_void),
            Some(&mut size),
        )
    };
    if status != ERROR_SUCCESS {
        return None;
    }
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len]).trim().parse().ok()
}
