//! Global TSF compartment access.
//!
//! Reaching a compartment takes four nested acquisitions (COM apartment,
//! thread manager, its activation, the compartment manager). Each is held by a
//! guard so that an early `?` return unwinds exactly what was acquired so far.

use imeswitch_core::{CompartmentCell, CompartmentId, CompartmentStore, PlatformError};
use log::debug;
use windows::core::{GUID, HRESULT, VARIANT};
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_INPROC_SERVER,
    COINIT_APARTMENTTHREADED,
};
use windows::Win32::System::Variant::VT_I4;
use windows::Win32::UI::TextServices::{
    CLSID_TF_ThreadMgr, ITfCompartment, ITfCompartmentMgr, ITfThreadMgr,
};

use crate::window::Win32Platform;

fn api_failure(call: &'static str, hr: HRESULT) -> PlatformError {
    PlatformError::ApiFailure { call, code: hr.0 as u32 }
}

/// The cell's value if it holds a `VT_I4`. Other variant types are not
/// coerced, so a foreign value is never folded into the conversion bits.
fn integer_value(value: &VARIANT) -> Option<i32> {
    let vt = unsafe { value.as_raw().Anonymous.Anonymous.vt };
    if vt != VT_I4.0 {
        return None;
    }
    i32::try_from(value).ok()
}

fn com_failure(call: &'static str) -> impl Fn(windows::core::Error) -> PlatformError {
    move |e| api_failure(call, e.code())
}

/// Single-threaded apartment, uninitialized on drop only if this scope joined it
struct ComApartment {
    initialized: bool,
}

impl ComApartment {
    fn enter() -> Result<Self, PlatformError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr == RPC_E_CHANGED_MODE {
            // Already in a multithreaded apartment; usable as is
            return Ok(ComApartment { initialized: false });
        }
        if hr.is_err() {
            return Err(api_failure("CoInitializeEx", hr));
        }
        Ok(ComApartment { initialized: true })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// An activated thread manager, deactivated on drop
struct ActiveThreadMgr {
    mgr: ITfThreadMgr,
    client_id: u32,
}

impl ActiveThreadMgr {
    fn activate() -> Result<Self, PlatformError> {
        let mgr: ITfThreadMgr =
            unsafe { CoCreateInstance(&CLSID_TF_ThreadMgr, None, CLSCTX_INPROC_SERVER) }
                .map_err(com_failure("CoCreateInstance"))?;
        let client_id = unsafe { mgr.Activate() }.map_err(com_failure("ITfThreadMgr::Activate"))?;
        Ok(ActiveThreadMgr { mgr, client_id })
    }
}

impl Drop for ActiveThreadMgr {
    fn drop(&mut self) {
        if let Err(e) = unsafe { self.mgr.Deactivate() } {
            debug!("ITfThreadMgr::Deactivate failed: {}", e);
        }
    }
}

// Fields drop in declaration order: compartment, manager, thread manager, COM.
struct TsfCompartment {
    compartment: ITfCompartment,
    _global: ITfCompartmentMgr,
    session: ActiveThreadMgr,
    _com: ComApartment,
}

impl TsfCompartment {
    fn open(id: CompartmentId) -> Result<Self, PlatformError> {
        let com = ComApartment::enter()?;
        let session = ActiveThreadMgr::activate()?;
        let global = unsafe { session.mgr.GetGlobalCompartment() }
            .map_err(com_failure("ITfThreadMgr::GetGlobalCompartment"))?;

        let guid = GUID::from_u128(id.as_u128());
        let compartment = unsafe { global.GetCompartment(&guid) }
            .map_err(com_failure("ITfCompartmentMgr::GetCompartment"))?;

        Ok(TsfCompartment {
            compartment,
            _global: global,
            session,
            _com: com,
        })
    }
}

impl CompartmentCell for TsfCompartment {
    fn get(&self) -> Result<Option<i32>, PlatformError> {
        let value = unsafe { self.compartment.GetValue() }
            .map_err(com_failure("ITfCompartment::GetValue"))?;
        Ok(integer_value(&value))
    }

    fn set(&mut self, value: i32) -> Result<(), PlatformError> {
        let variant = VARIANT::from(value);
        unsafe { self.compartment.SetValue(self.session.client_id, &variant) }
            .map_err(com_failure("ITfCompartment::SetValue"))
    }
}

impl CompartmentStore for Win32Platform {
    fn open(&self, id: CompartmentId) -> Result<Box<dyn CompartmentCell + '_>, PlatformError> {
        Ok(Box::new(TsfCompartment::open(id)?))
    }
}
