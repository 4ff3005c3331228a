//! USB HID class configuration: descriptor, endpoints, class requests.

use crate::shared::SharedState;
use embassy_usb::class::hid::{
    Config, HidReader, HidReaderWriter, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use joystick_proto::JoystickReport;

/// Concrete USB driver type for this board.
pub type UsbDriver = embassy_rp::usb::Driver<'static, embassy_rp::peripherals::USB>;

/// Max packet size for both interrupt endpoints.
///
/// The input report is 7 bytes; the pad this device impersonates uses
/// 8-byte endpoints.
pub const EP_SIZE: usize = 8;

/// IN (device-to-host) half of the HID endpoint pair.
pub type HidIn = HidWriter<'static, UsbDriver, EP_SIZE>;

/// OUT (host-to-device) half of the HID endpoint pair.
pub type HidOut = HidReader<'static, UsbDriver, EP_SIZE>;

/// HID report descriptor for the emulated game controller.
///
/// Modeled on the report shape of a commercial pad (hat switch,
/// 16 buttons, four 8-bit absolute axes) so host operating systems
/// and consoles recognize it without custom drivers. The field order
/// matches [`JoystickReport::to_bytes`]: hat byte first, then the
/// button bits, then the axes.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Hat switch (4 bits + 4 bits constant padding) ---
    0x09, 0x39, //   Usage (Hat Switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant) - padding
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Sticks: X, Y, Z, Rz as 0-255 absolute axes ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// HID class request handler.
///
/// GetReport returns the current controller snapshot; SetReport and
/// interrupt OUT payloads are accepted and dropped (received but
/// unused, reserved for future host-originated commands).
pub struct JoystickRequestHandler {
    state: &'static SharedState,
}

impl JoystickRequestHandler {
    /// Create a handler reading from the given shared snapshot.
    pub fn new(state: &'static SharedState) -> Self {
        Self { state }
    }
}

impl RequestHandler for JoystickRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::In(_) => {
                let bytes = JoystickReport::from(&self.state.get()).to_bytes();
                if buf.len() < bytes.len() {
                    return None;
                }
                buf[..bytes.len()].copy_from_slice(&bytes);
                Some(bytes.len())
            }
            _ => None,
        }
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        // Payload intentionally discarded
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the reader/writer pair for the OUT and IN interrupt
/// endpoints. The request handler services GetReport/SetReport
/// control transfers.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver>,
    state: &'d mut State<'d>,
    request_handler: &'d mut dyn RequestHandler,
) -> HidReaderWriter<'d, UsbDriver, EP_SIZE, EP_SIZE> {
    let config = Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: 1,
        max_packet_size: EP_SIZE as u16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidReaderWriter::new(builder, state, config)
}
