//! WAV 容器构建与解析
//!
//! 将单声道 16 位 PCM 包装成可直接播放的 WAV 文件（44 字节标准头 + 小端样本）

use super::AudioError;

/// 标准 WAV 头长度
pub const WAV_HEADER_LEN: usize = 44;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = CHANNELS * (BITS_PER_SAMPLE / 8);
const PCM_FORMAT: u16 = 1;

/// 把小端字节流还原为 i16 样本
///
/// 末尾多出的单个字节被丢弃
pub fn pcm_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// 构建单声道 16 位 WAV
///
/// 总长度恒为 `44 + 2 * samples.len()`
pub fn build_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_size = samples.len() * 2;
    let byte_rate = sample_rate.saturating_mul(BLOCK_ALIGN as u32);

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());

    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

/// 解析出的 WAV 头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF 块声明的大小（文件总长 - 8）
    pub riff_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// data 块起始偏移
    pub data_start: usize,
    /// data 块声明的字节数
    pub data_size: u32,
}

impl WavHeader {
    /// 解析 WAV 头，按 chunk 遍历直到 data 块
    pub fn parse(data: &[u8]) -> Result<Self, AudioError> {
        if data.len() < WAV_HEADER_LEN {
            return Err(AudioError::InvalidHeader("WAV data too short"));
        }
        if &data[0..4] != b"RIFF" {
            return Err(AudioError::InvalidHeader("missing RIFF header"));
        }
        if &data[8..12] != b"WAVE" {
            return Err(AudioError::InvalidHeader("missing WAVE identifier"));
        }

        let riff_size = read_u32(data, 4);
        let mut fmt: Option<(u16, u16, u32, u32, u16, u16)> = None;
        let mut pos = 12;

        while pos + 8 <= data.len() {
            let chunk_id = &data[pos..pos + 4];
            let chunk_size = read_u32(data, pos + 4) as usize;
            let body = pos + 8;

            match chunk_id {
                b"fmt " => {
                    if chunk_size < 16 || body + 16 > data.len() {
                        return Err(AudioError::InvalidHeader("invalid fmt chunk size"));
                    }
                    fmt = Some((
                        read_u16(data, body),
                        read_u16(data, body + 2),
                        read_u32(data, body + 4),
                        read_u32(data, body + 8),
                        read_u16(data, body + 12),
                        read_u16(data, body + 14),
                    ));
                }
                b"data" => {
                    let (audio_format, channels, sample_rate, byte_rate, block_align, bits) =
                        fmt.ok_or(AudioError::InvalidHeader("data chunk before fmt chunk"))?;
                    return Ok(Self {
                        riff_size,
                        audio_format,
                        channels,
                        sample_rate,
                        byte_rate,
                        block_align,
                        bits_per_sample: bits,
                        data_start: body,
                        data_size: chunk_size as u32,
                    });
                }
                _ => {}
            }

            // 对齐到偶数字节
            pos = body + chunk_size + (chunk_size % 2);
        }

        Err(AudioError::InvalidHeader("missing data chunk"))
    }

    /// 每声道样本数
    pub fn sample_count(&self) -> usize {
        if self.block_align == 0 {
            return 0;
        }
        self.data_size as usize / self.block_align as usize
    }

    /// 播放时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.sample_count() as u64 * 1000 / self.sample_rate as u64
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
