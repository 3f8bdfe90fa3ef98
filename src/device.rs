//! Capture-capable interfaces, as reported by `pcap_findalldevs`.

use crate::error::CaptureError;

use pcap::Device;


/// Ordered snapshot of the interfaces libpcap can open. The list is owned as a
/// whole and released when dropped.
#[derive(Debug, Default)]
pub struct DeviceList {
    devices: Vec<Device>,
}

impl DeviceList {
    pub fn list() -> Result<Self, CaptureError> {
        let devices = Device::list().map_err(CaptureError::Enumeration)?;
        tracing::debug!(count = devices.len(), "enumerated capture devices");
        Ok(Self { devices })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|device| device.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.name == name)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl From<Vec<Device>> for DeviceList {
    fn from(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
