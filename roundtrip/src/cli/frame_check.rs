use anyhow::{Result, bail};
use clap::Parser;
use ffmpeg_next::{ffi, util::frame::audio::Audio as AudioFrameFFmpeg};
use ffmpeg_types::SampleFormat;

#[derive(Parser, Debug)]
pub struct FrameCheckCommand {
    /// Samples per channel in the test frame
    #[arg(short = 'n', long, default_value = "240")]
    pub samples: usize,

    /// Channel count (1 or 2)
    #[arg(short, long, default_value = "1")]
    pub channels: u16,
}

impl FrameCheckCommand {
    /**
        Attach an S16 buffer to an empty frame with `avcodec_fill_audio_frame`
        and print its result, then check libavcodec's packed buffer size
        against ours.
    */
    pub fn run(self) -> Result<()> {
        if !matches!(self.channels, 1 | 2) {
            bail!("frame check supports 1 or 2 channels, got {}", self.channels);
        }
        if self.samples == 0 {
            bail!("sample count must be positive");
        }
        let Ok(nb_samples) = i32::try_from(self.samples) else {
            bail!("{} samples do not fit a libavcodec frame", self.samples);
        };
        let nb_channels = i32::from(self.channels);
        let format = ffi::AVSampleFormat::AV_SAMPLE_FMT_S16;

        ffmpeg_next::init()?;

        // Sizes that overflow an int come back as EINVAL; nothing is allocated yet
        let aligned_size = unsafe {
            ffi::av_samples_get_buffer_size(
                std::ptr::null_mut(),
                nb_channels,
                nb_samples,
                format,
                0,
            )
        };
        if aligned_size < 0 {
            bail!(
                "libavcodec rejected {} x {} S16 samples ({})",
                self.samples,
                self.channels,
                aligned_size
            );
        }

        let mut frame = AudioFrameFFmpeg::empty();
        let buf = unsafe { ffi::av_malloc(aligned_size as usize) } as *mut u8;
        if buf.is_null() {
            bail!("failed to allocate {} bytes for the frame", aligned_size);
        }

        let (fill_result, plane_bytes) = unsafe {
            let frame_ptr = frame.as_mut_ptr();
            (*frame_ptr).nb_samples = nb_samples;
            (*frame_ptr).format = format as i32;
            ffi::av_channel_layout_default(&mut (*frame_ptr).ch_layout, nb_channels);

            let rc = ffi::avcodec_fill_audio_frame(
                frame_ptr,
                nb_channels,
                format,
                buf,
                aligned_size,
                0,
            );
            (rc, (*frame_ptr).linesize[0])
        };
        println!("fill audio result = {}", fill_result);

        // The frame only borrows buf, so it must go first
        drop(frame);
        unsafe { ffi::av_free(buf as *mut std::ffi::c_void) };

        if fill_result < 0 {
            bail!("avcodec_fill_audio_frame failed ({})", fill_result);
        }

        let library_size = unsafe {
            ffi::av_samples_get_buffer_size(
                std::ptr::null_mut(),
                nb_channels,
                nb_samples,
                format,
                1,
            )
        };
        let packed_size = SampleFormat::S16.buffer_size(self.channels, self.samples);
        tracing::debug!(
            fill_result,
            aligned_size,
            library_size,
            packed_size,
            plane_bytes,
            "frame buffer sizes"
        );

        if library_size < 0 || library_size as usize != packed_size {
            bail!(
                "libavcodec sizes the packed buffer at {} bytes, expected {}",
                library_size,
                packed_size
            );
        }
        if (plane_bytes as usize) < packed_size {
            bail!(
                "filled frame plane holds {} bytes, need {}",
                plane_bytes,
                packed_size
            );
        }
        Ok(())
    }
}
