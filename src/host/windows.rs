// Win32 host backends: monitor work areas, cursor and keyboard injection

use crate::errors::{GridError, GridResult};
use crate::geometry::Rect;
use crate::host::{DisplaySource, Feedback, PointerBackend};
use crate::pointer::{Modifier, MouseButton};
use log::{debug, warn};
use std::mem;
use std::ptr;
use winapi::shared::minwindef::{BOOL, DWORD, LPARAM, TRUE};
use winapi::shared::windef::{HDC, HMONITOR, LPRECT, RECT};
use winapi::um::winuser::{
    keybd_event, mouse_event, EnumDisplayMonitors, GetMonitorInfoW, MessageBeep, SetCursorPos,
    KEYEVENTF_KEYUP, MB_ICONWARNING, MONITORINFO, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    VK_CONTROL, VK_LWIN, VK_MENU, VK_SHIFT,
};

fn rect_from_win(rect: &RECT) -> Rect {
    Rect::from_edges(
        rect.left as f64,
        rect.top as f64,
        rect.right as f64,
        rect.bottom as f64,
    )
}

/// Work areas (taskbar excluded) of every monitor, in enumeration order
#[derive(Debug, Default)]
pub struct WindowsDisplays;

impl DisplaySource for WindowsDisplays {
    fn enumerate_displays(&self) -> GridResult<Vec<Rect>> {
        let mut monitors: Vec<Rect> = Vec::new();

        unsafe extern "system" fn monitor_enum_proc(
            hmonitor: HMONITOR,
            _hdc: HDC,
            _rect: LPRECT,
            data: LPARAM,
        ) -> BOOL {
            let monitors = &mut *(data as *mut Vec<Rect>);
            let mut info: MONITORINFO = mem::zeroed();
            info.cbSize = mem::size_of::<MONITORINFO>() as DWORD;
            if GetMonitorInfoW(hmonitor, &mut info) != 0 {
                monitors.push(rect_from_win(&info.rcWork));
            }
            TRUE // Continue enumeration
        }

        let ok = unsafe {
            EnumDisplayMonitors(
                ptr::null_mut(),
                ptr::null(),
                Some(monitor_enum_proc),
                &mut monitors as *mut Vec<Rect> as LPARAM,
            )
        };
        if ok == 0 {
            return Err(GridError::Display("EnumDisplayMonitors failed".to_string()));
        }

        debug!("🖥️ Found {} monitor(s)", monitors.len());
        Ok(monitors)
    }
}

/// Injects pointer and modifier input with the legacy Win32 calls
#[derive(Debug, Default)]
pub struct WindowsPointer;

impl WindowsPointer {
    fn button_flags(button: MouseButton) -> (DWORD, DWORD) {
        match button {
            MouseButton::Primary => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP),
            MouseButton::Secondary => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP),
            MouseButton::Middle => (MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP),
        }
    }

    fn virtual_key(modifier: Modifier) -> u8 {
        let vk = match modifier {
            Modifier::Ctrl => VK_CONTROL,
            Modifier::Shift => VK_SHIFT,
            Modifier::Alt => VK_MENU,
            Modifier::Super => VK_LWIN,
        };
        vk as u8
    }
}

impl PointerBackend for WindowsPointer {
    fn move_pointer(&mut self, x: f64, y: f64) -> GridResult<()> {
        let ok = unsafe { SetCursorPos(x.round() as i32, y.round() as i32) };
        if ok == 0 {
            return Err(GridError::Pointer(format!(
                "SetCursorPos({}, {}) failed",
                x, y
            )));
        }
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> GridResult<()> {
        let (down, up) = Self::button_flags(button);
        unsafe {
            mouse_event(down, 0, 0, 0, 0);
            mouse_event(up, 0, 0, 0, 0);
        }
        Ok(())
    }

    fn start_drag(&mut self) -> GridResult<()> {
        let (down, _) = Self::button_flags(MouseButton::Primary);
        unsafe { mouse_event(down, 0, 0, 0, 0) };
        Ok(())
    }

    fn release_button(&mut self, button: MouseButton) -> GridResult<()> {
        let (_, up) = Self::button_flags(button);
        unsafe { mouse_event(up, 0, 0, 0, 0) };
        Ok(())
    }

    fn key_down(&mut self, modifier: Modifier) -> GridResult<()> {
        unsafe { keybd_event(Self::virtual_key(modifier), 0, 0, 0) };
        Ok(())
    }

    fn key_up(&mut self, modifier: Modifier) -> GridResult<()> {
        unsafe { keybd_event(Self::virtual_key(modifier), 0, KEYEVENTF_KEYUP, 0) };
        Ok(())
    }
}

/// System warning sound
#[derive(Debug, Default)]
pub struct BeepFeedback;

impl Feedback for BeepFeedback {
    fn signal_invalid(&mut self) {
        if unsafe { MessageBeep(MB_ICONWARNING) } == 0 {
            warn!("⚠️ MessageBeep failed");
        }
    }
}
