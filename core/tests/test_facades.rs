#[cfg(test)]
mod tests {
    use std::io::{self, BufRead, Read, Write};

    use proptest::prelude::*;
    use cryptostream_core::{
        config::StreamConfig,
        stream::{decode_from_slice, decode_stream, encode_stream, encode_to_vec, TransformReader, TransformWriter},
        transform::{
            codecs::{Crc32Append, Crc32Verify, IdentityTransform, ZeroPadTransform},
            BlockTransform, TransformError,
        },
        types::StreamError,
    };

    /// Worst-case transform: every call grows by `block - 1` bytes and
    /// finalize emits `2 * block - 1`. Refuses to write past `output`.
    struct MaxExpansion {
        block: usize,
    }

    fn put(bytes: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if bytes.len() > output.len() {
            return Err(TransformError::OutputTooSmall { needed: bytes.len(), available: output.len() });
        }
        output[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    impl BlockTransform for MaxExpansion {
        fn block_size(&self) -> usize {
            self.block
        }

        fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
            let mut out = input.to_vec();
            out.resize(input.len() + self.block - 1, 0xEE);
            put(&out, output)
        }

        fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
            put(&vec![0xFF; 2 * self.block - 1], output)
        }
    }

// # ✅ 1. Write facade: Write trait plus finish

    #[test]
    fn writer_round_trips_through_write_all() {
        let mut writer = TransformWriter::with_buffer_size(Vec::new(), Crc32Append::new(), 64).unwrap();
        writer.write_all(b"streaming payload").unwrap();
        writer.flush().unwrap();
        let encoded = writer.finish().unwrap();

        assert_eq!(encoded.len(), b"streaming payload".len() + 4);
        let decoded = decode_from_slice(&encoded, Crc32Verify::new()).unwrap();
        assert_eq!(decoded, b"streaming payload");
    }

    #[test]
    fn writer_close_is_idempotent_and_stops_accepting() {
        let mut writer = TransformWriter::with_buffer_size(Vec::new(), ZeroPadTransform::new(4).unwrap(), 8).unwrap();
        writer.write_all(b"abcdef").unwrap();
        writer.close().unwrap();
        writer.close().unwrap();
        assert!(writer.is_closed());
        assert_eq!(writer.get_ref().unwrap().as_slice(), b"abcdef\0\0");

        // Write::write_all treats Ok(0) as WriteZero.
        let err = writer.write_all(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(writer.try_write(b"late").unwrap(), 0);
    }

    #[test]
    fn dropping_writer_finalizes_into_sink() {
        let mut sink = Vec::new();
        {
            let mut writer = TransformWriter::new(&mut sink, ZeroPadTransform::new(8).unwrap()).unwrap();
            writer.write_all(b"xyz").unwrap();
        }
        assert_eq!(sink, b"xyz\0\0\0\0\0");
    }

// # ✅ 2. Read facade: tiny caller buffers never signal a false EOF

    #[test]
    fn one_byte_reads_see_the_whole_stream() {
        let encoded = encode_to_vec(b"abcdefghij", Crc32Append::new()).unwrap();
        let mut reader = TransformReader::with_buffer_size(&encoded[..], Crc32Verify::new(), 8).unwrap();

        let mut out = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            let n = reader.read(&mut byte).unwrap();
            if n == 0 {
                break;
            }
            out.push(byte[0]);
        }
        assert_eq!(out, b"abcdefghij");
        assert!(reader.is_exhausted());
        assert_eq!(reader.read(&mut byte).unwrap(), 0);
    }

    #[test]
    fn bufread_lines_work_over_a_transform() {
        let text = b"first line\nsecond line\nthird";
        let mut reader = TransformReader::with_buffer_size(&text[..], IdentityTransform::new(), 8).unwrap();

        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "first line\n");

        let rest: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(rest, vec!["second line".to_string(), "third".to_string()]);
    }

    #[test]
    fn reader_close_stops_further_reads() {
        let mut reader = TransformReader::new(&b"payload"[..], IdentityTransform::new()).unwrap();
        reader.close().unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert!(reader.get_ref().is_none());
    }

    #[test]
    fn read_to_end_matches_input() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut reader = TransformReader::with_buffer_size(&data[..], IdentityTransform::new(), 100).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
        assert_eq!(reader.counters().bytes_in, 5000);
        assert_eq!(reader.counters().finalize_calls, 1);
    }

// # ❌ 3. Errors surface through std::io with meaningful kinds

    #[test]
    fn corrupted_checksum_is_invalid_data() {
        let mut encoded = encode_to_vec(b"integrity matters", Crc32Append::new()).unwrap();
        encoded[3] ^= 0x01;

        let mut reader = TransformReader::new(&encoded[..], Crc32Verify::new()).unwrap();
        let mut out = Vec::new();
        let err = reader.read_to_end(&mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn typed_read_error_keeps_transform_detail() {
        let mut reader = TransformReader::new(&b"ab"[..], Crc32Verify::new()).unwrap();
        let mut buf = [0u8; 64];
        let err = reader.try_read(&mut buf).unwrap_err();
        assert!(matches!(err, StreamError::Transform(TransformError::TruncatedTrailer { have: 2, need: 4 })));
    }

    #[test]
    fn undersized_buffer_is_invalid_input() {
        let err = TransformWriter::with_buffer_size(Vec::new(), ZeroPadTransform::new(16).unwrap(), 31).err().unwrap();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

// # ✅ 4. Pipe helpers

    #[test]
    fn encode_and_decode_stream_with_config() {
        let config = StreamConfig::new(Some(32));
        let data = vec![0x5Au8; 1000];

        let mut encoded = Vec::new();
        let enc = encode_stream(&mut &data[..], &mut encoded, Crc32Append::new(), &config).unwrap();
        assert_eq!(enc.bytes_in, 1000);
        assert_eq!(enc.bytes_out, 1004);
        assert_eq!(enc.finalize_calls, 1);

        let mut decoded = Vec::new();
        let dec = decode_stream(&mut &encoded[..], &mut decoded, Crc32Verify::new(), &config).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(dec.bytes_out, 1000);
    }

// # ✅ 5. Bounded expansion never overflows the scratch or caller buffer

    proptest! {
        #[test]
        fn prop_write_side_fits_worst_case_expansion(
            data in proptest::collection::vec(any::<u8>(), 0..600),
            block in 1usize..=16,
            extra in 0usize..40,
            piece in 1usize..100,
        ) {
            let buffer_size = 2 * block + extra;
            let mut writer = TransformWriter::with_buffer_size(Vec::new(), MaxExpansion { block }, buffer_size).unwrap();
            for chunk in data.chunks(piece) {
                prop_assert_eq!(writer.try_write(chunk).unwrap(), chunk.len());
            }
            writer.close().unwrap();

            let c = writer.counters().clone();
            let out = writer.finish().unwrap();
            let expected = data.len() + c.transform_calls as usize * (block - 1) + 2 * block - 1;
            prop_assert_eq!(out.len(), expected);
            prop_assert_eq!(c.bytes_in as usize, data.len());
        }

        #[test]
        fn prop_read_side_fits_worst_case_expansion(
            data in proptest::collection::vec(any::<u8>(), 0..600),
            block in 1usize..=16,
            extra in 0usize..40,
            read_len in 1usize..200,
        ) {
            let buffer_size = 2 * block + extra;
            let mut reader = TransformReader::with_buffer_size(&data[..], MaxExpansion { block }, buffer_size).unwrap();
            let mut out = Vec::new();
            let mut buf = vec![0u8; read_len];
            loop {
                let n = reader.try_read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                out.extend_from_slice(&buf[..n]);
            }

            let c = reader.counters();
            prop_assert_eq!(c.bytes_in as usize, data.len());
            prop_assert_eq!(c.finalize_calls, 1);
            prop_assert_eq!(out.len() as u64, c.bytes_out);
            prop_assert!(out.ends_with(&vec![0xFF; 2 * block - 1]));
        }

        #[test]
        fn prop_identity_is_transparent_for_any_chunking(
            data in proptest::collection::vec(any::<u8>(), 0..2000),
            piece in 1usize..300,
            buffer_size in 2usize..128,
        ) {
            let mut writer = TransformWriter::with_buffer_size(Vec::new(), IdentityTransform::new(), buffer_size).unwrap();
            for chunk in data.chunks(piece) {
                writer.write_all(chunk).unwrap();
            }
            let out = writer.finish().unwrap();
            prop_assert_eq!(out, data);
        }

        #[test]
        fn prop_write_then_read_reproduces_input(
            data in proptest::collection::vec(any::<u8>(), 0..4000),
            write_piece in 1usize..300,
            read_piece in 1usize..300,
            write_buffer in 2usize..128,
            read_buffer in 2usize..128,
        ) {
            let mut writer = TransformWriter::with_buffer_size(Vec::new(), IdentityTransform::new(), write_buffer).unwrap();
            for chunk in data.chunks(write_piece) {
                writer.write_all(chunk).unwrap();
            }
            let written = writer.finish().unwrap();

            let mut reader = TransformReader::with_buffer_size(&written[..], IdentityTransform::new(), read_buffer).unwrap();
            let mut out = Vec::new();
            let mut buf = vec![0u8; read_piece];
            loop {
                let n = reader.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                out.extend_from_slice(&buf[..n]);
            }
            prop_assert_eq!(out, data);
            prop_assert_eq!(reader.counters().finalize_calls, 1);
        }
    }
}
