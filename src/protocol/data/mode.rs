use flagset::{FlagSet, flags};

use crate::OpenRgbResult;
use crate::protocol::data::{Color, Versioned};
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};
use crate::wire_enum;

flags! {
    /// Feature flags of a [`Mode`].
    pub enum ModeFlag: u32 {
        /// Mode has a speed parameter.
        HasSpeed = 1 << 0,

        /// Mode direction can be left/right.
        HasDirectionLR = 1 << 1,

        /// Mode direction can be up/down.
        HasDirectionUD = 1 << 2,

        /// Mode direction can be horizontal/vertical.
        HasDirectionHV = 1 << 3,

        /// Mode has a direction parameter.
        HasDirection = (ModeFlag::HasDirectionLR | ModeFlag::HasDirectionUD | ModeFlag::HasDirectionHV).bits(),

        /// Mode has a brightness parameter.
        HasBrightness = 1 << 4,

        /// Mode uses per-LED colors.
        HasPerLedColor = 1 << 5,

        /// Mode uses mode-specific colors.
        HasModeSpecificColor = 1 << 6,

        /// Mode can pick random colors.
        HasRandomColor = 1 << 7,

        /// Mode can be saved manually.
        ManualSave = 1 << 8,

        /// Mode saves automatically.
        AutomaticSave = 1 << 9,
    }
}

/// Effect direction of a [`Mode`].
///
/// Servers may send directions this client does not know; those pass through
/// untouched as [`Direction::Other`] rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Leftwards.
    Left,
    /// Rightwards.
    Right,
    /// Upwards.
    Up,
    /// Downwards.
    Down,
    /// Horizontal.
    Horizontal,
    /// Vertical.
    Vertical,
    /// A direction value unknown to this client, carried as-is.
    Other(u32),
}

impl Direction {
    fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Up,
            3 => Self::Down,
            4 => Self::Horizontal,
            5 => Self::Vertical,
            other => Self::Other(other),
        }
    }

    fn as_raw(self) -> u32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
            Self::Horizontal => 4,
            Self::Vertical => 5,
            Self::Other(raw) => raw,
        }
    }
}

impl DeserFromBuf for Direction {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        Ok(Self::from_raw(buf.read_u32()?))
    }
}

impl SerToBuf for Direction {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        buf.write_u32(self.as_raw());
        Ok(())
    }
}

wire_enum! {
    /// How a [`Mode`] gets its colors.
    pub enum ColorMode {
        /// Mode has no colors.
        None = 0,
        /// Colors are set per LED.
        PerLed = 1,
        /// Colors are specific to the mode.
        ModeSpecific = 2,
        /// Colors are chosen at random.
        Random = 3,
    }
}

/// A lighting effect selectable on a device.
///
/// Speed, brightness, direction and colors are only meaningful when the
/// matching [`ModeFlag`] is set; the accessors fold that check in. The
/// brightness fields exist on the wire from protocol version 3 onwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mode {
    device_index: u32,
    index: u32,
    name: String,
    /// Device-specific mode value.
    value: i32,
    flags: FlagSet<ModeFlag>,
    speed_min: u32,
    speed_max: u32,
    speed: u32,
    brightness_min: Versioned<3, u32>,
    brightness_max: Versioned<3, u32>,
    brightness: Versioned<3, u32>,
    colors_min: u32,
    colors_max: u32,
    direction: Direction,
    color_mode: ColorMode,
    colors: Vec<Color>,
}

impl Mode {
    /// Name of this mode.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the device this mode belongs to.
    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    /// Index of this mode within its device.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Feature flags of this mode.
    pub fn flags(&self) -> FlagSet<ModeFlag> {
        self.flags
    }

    /// Speed, if the mode has one.
    pub fn speed(&self) -> Option<u32> {
        self.flags
            .contains(ModeFlag::HasSpeed)
            .then_some(self.speed)
    }

    /// Minimum speed, if the mode has a speed.
    pub fn speed_min(&self) -> Option<u32> {
        self.flags
            .contains(ModeFlag::HasSpeed)
            .then_some(self.speed_min)
    }

    /// Maximum speed, if the mode has a speed.
    pub fn speed_max(&self) -> Option<u32> {
        self.flags
            .contains(ModeFlag::HasSpeed)
            .then_some(self.speed_max)
    }

    /// Sets the speed; a no-op when the mode has no speed.
    pub fn set_speed(&mut self, speed: u32) {
        if self.flags.contains(ModeFlag::HasSpeed) {
            self.speed = speed;
        }
    }

    /// Brightness, if the mode and protocol version have one.
    pub fn brightness(&self) -> Option<u32> {
        if !self.flags.contains(ModeFlag::HasBrightness) {
            return None;
        }
        self.brightness.get().copied()
    }

    /// Minimum brightness, if the mode and protocol version have one.
    pub fn brightness_min(&self) -> Option<u32> {
        if !self.flags.contains(ModeFlag::HasBrightness) {
            return None;
        }
        self.brightness_min.get().copied()
    }

    /// Maximum brightness, if the mode and protocol version have one.
    pub fn brightness_max(&self) -> Option<u32> {
        if !self.flags.contains(ModeFlag::HasBrightness) {
            return None;
        }
        self.brightness_max.get().copied()
    }

    /// Sets the brightness; a no-op when the mode or protocol version has
    /// none.
    pub fn set_brightness(&mut self, brightness: u32) {
        if self.flags.contains(ModeFlag::HasBrightness) {
            self.brightness.replace(brightness);
        }
    }

    /// Direction, if the mode has one.
    pub fn direction(&self) -> Option<Direction> {
        self.flags
            .contains(ModeFlag::HasDirection)
            .then_some(self.direction)
    }

    /// Sets the direction; a no-op when the mode has no direction.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.flags.contains(ModeFlag::HasDirection) {
            self.direction = direction;
        }
    }

    /// How this mode gets its colors.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Preset colors of this mode.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Minimum number of colors, if the mode has colors.
    pub fn colors_min(&self) -> Option<u32> {
        (!self.colors.is_empty()).then_some(self.colors_min)
    }

    /// Maximum number of colors, if the mode has colors.
    pub fn colors_max(&self) -> Option<u32> {
        (!self.colors.is_empty()).then_some(self.colors_max)
    }

    pub(crate) fn set_location(&mut self, device_index: u32, index: u32) {
        self.device_index = device_index;
        self.index = index;
    }
}

impl DeserFromBuf for Mode {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let name = buf.read_value()?;
        let value = buf.read_value()?;
        let flags = buf.read_value()?;
        let speed_min = buf.read_value()?;
        let speed_max = buf.read_value()?;
        let brightness_min = buf.read_value()?;
        let brightness_max = buf.read_value()?;
        let brightness = buf.read_value()?;
        let colors_min = buf.read_value()?;
        let colors_max = buf.read_value()?;
        let speed = buf.read_value()?;
        let direction = buf.read_value()?;
        let color_mode = buf.read_value()?;
        let colors = buf.read_value()?;

        Ok(Mode {
            device_index: u32::MAX,
            index: u32::MAX,
            name,
            value,
            flags,
            speed_min,
            speed_max,
            speed,
            brightness_min,
            brightness_max,
            brightness,
            colors_min,
            colors_max,
            direction,
            color_mode,
            colors,
        })
    }
}

impl SerToBuf for Mode {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        buf.push_value(&self.name)?
            .push_value(&self.value)?
            .push_value(&self.flags)?
            .push_value(&self.speed_min)?
            .push_value(&self.speed_max)?
            .push_value(&self.brightness_min)?
            .push_value(&self.brightness_max)?
            .push_value(&self.brightness)?
            .push_value(&self.colors_min)?
            .push_value(&self.colors_max)?
            .push_value(&self.speed)?
            .push_value(&self.direction)?
            .push_value(&self.color_mode)?
            .push_value(&self.colors)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(version: u32) -> Mode {
        Mode {
            device_index: u32::MAX,
            index: u32::MAX,
            name: "Breathing".to_string(),
            value: 2,
            flags: ModeFlag::HasSpeed | ModeFlag::HasBrightness | ModeFlag::HasModeSpecificColor,
            speed_min: 10,
            speed_max: 100,
            speed: 50,
            brightness_min: Versioned::new(0, version),
            brightness_max: Versioned::new(255, version),
            brightness: Versioned::new(128, version),
            colors_min: 1,
            colors_max: 2,
            direction: Direction::Left,
            color_mode: ColorMode::ModeSpecific,
            colors: vec![Color::new(255, 0, 0), Color::new(0, 0, 255)],
        }
    }

    #[test]
    fn round_trip_at_version_3() -> OpenRgbResult<()> {
        let mode = sample(3);
        let mut buf = WriteMessage::new(3);
        buf.write_value(&mode)?;
        let mut msg = buf.as_received();
        assert_eq!(msg.read_value::<Mode>()?, mode);
        assert_eq!(msg.remaining(), 0);
        Ok(())
    }

    #[test]
    fn round_trip_at_version_2() -> OpenRgbResult<()> {
        let mode = sample(2);
        let mut buf = WriteMessage::new(2);
        buf.write_value(&mode)?;
        let mut msg = buf.as_received();
        assert_eq!(msg.read_value::<Mode>()?, mode);
        assert_eq!(msg.remaining(), 0);
        Ok(())
    }

    #[test]
    fn brightness_fields_gated_by_version() -> OpenRgbResult<()> {
        let mut v3 = WriteMessage::new(3);
        v3.write_value(&sample(3))?;
        let mut v2 = WriteMessage::new(2);
        v2.write_value(&sample(2))?;
        // exactly the three u32 brightness fields
        assert_eq!(v3.len(), v2.len() + 12);
        Ok(())
    }

    #[test]
    fn flag_gated_accessors() -> OpenRgbResult<()> {
        let mode = sample(3);
        assert_eq!(mode.speed(), Some(50));
        assert_eq!(mode.speed_min(), Some(10));
        assert_eq!(mode.speed_max(), Some(100));
        assert_eq!(mode.brightness(), Some(128));
        assert_eq!(mode.direction(), None); // no HasDirection flag
        assert_eq!(mode.colors_min(), Some(1));
        assert_eq!(mode.colors_max(), Some(2));
        Ok(())
    }

    #[test]
    fn brightness_none_below_version_3() {
        let mode = sample(2);
        assert_eq!(mode.brightness(), None);
        assert_eq!(mode.brightness_min(), None);
        assert_eq!(mode.brightness_max(), None);
    }

    #[test]
    fn setters_respect_flags() {
        let mut mode = sample(3);
        mode.set_speed(75);
        mode.set_brightness(10);
        mode.set_direction(Direction::Right); // mode has no direction
        assert_eq!(mode.speed(), Some(75));
        assert_eq!(mode.brightness(), Some(10));
        assert_eq!(mode.direction, Direction::Left);
    }

    #[test]
    fn unknown_direction_passes_through() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(3);
        buf.write_u32(42);
        let mut msg = buf.as_received();
        let direction = msg.read_value::<Direction>()?;
        assert_eq!(direction, Direction::Other(42));

        let mut back = WriteMessage::new(3);
        back.write_value(&direction)?;
        assert_eq!(back.bytes(), &42_u32.to_le_bytes());
        Ok(())
    }
}
